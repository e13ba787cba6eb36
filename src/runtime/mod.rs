pub mod leader_follower;
pub mod pipeline;
