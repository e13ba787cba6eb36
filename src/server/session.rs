/*!
# Client Sessions

Per-client state and the record type that travels through the metric
pipeline. A session owns at most one graph; it is created on accept and
dropped on disconnect, releasing the graph with it.

Sessions are shared between the reactor and the workers computing MST
results, so they live behind a per-session mutex. The lock is held only for
short synchronous sections, never across a socket write.
*/

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;

use crate::core::error::{Result, SpantreeError};
use crate::core::types::Graph;

/// Handle to a client's outbox. All bytes sent here are written to the
/// client's socket by its writer task; sending to a gone client is a no-op.
pub type ClientTx = UnboundedSender<String>;

/// A client session and its optional graph.
#[derive(Debug, Default)]
pub struct Session {
    graph: Option<Graph>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session's graph. Any previous graph is dropped.
    pub fn replace_graph(&mut self, graph: Graph) {
        self.graph = Some(graph);
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    /// The session's graph, or `NoGraph` when none was created yet.
    pub fn graph(&self) -> Result<&Graph> {
        self.graph.as_ref().ok_or(SpantreeError::NoGraph)
    }

    pub fn graph_mut(&mut self) -> Result<&mut Graph> {
        self.graph.as_mut().ok_or(SpantreeError::NoGraph)
    }
}

/// A session behind its per-session mutex.
pub type SharedSession = Arc<Mutex<Session>>;

/// The record a pipeline stage owns while processing one MST request: the
/// computed tree, the report text accumulated so far, and the requester's
/// outbox. Moves from stage to stage; the tail stage sends the report and
/// drops the record.
pub struct MstReport {
    pub mst: Graph,
    pub message: String,
    pub client: ClientTx,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_graph_lifecycle() {
        let mut session = Session::new();
        assert!(!session.has_graph());
        assert!(matches!(session.graph(), Err(SpantreeError::NoGraph)));

        session.replace_graph(Graph::with_vertices(3));
        assert_eq!(session.graph().unwrap().num_vertices(), 3);

        session.replace_graph(Graph::with_vertices(5));
        assert_eq!(session.graph().unwrap().num_vertices(), 5);
    }
}
