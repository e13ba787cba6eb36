/*!
# Graph Generators

Deterministic graph generators used by tests and benchmarks. All randomness
flows from a caller-supplied seed so runs are reproducible.
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::Result;
use crate::core::types::Graph;

/// Builds the complete graph on `n` vertices.
///
/// Edge weights are `1 + (u + v) % max_weight` so the MST is non-trivial
/// without involving randomness.
pub fn complete_graph(n: usize, max_weight: usize) -> Result<Graph> {
    let mut g = Graph::with_vertices(n);
    let cap = max_weight.max(1);
    for u in 0..n {
        for v in (u + 1)..n {
            g.add_weighted_edge(u, v, 1 + (u + v) % cap)?;
        }
    }
    Ok(g)
}

/// Builds a random connected graph on `n` vertices.
///
/// A random spanning tree guarantees connectivity: each vertex `v > 0`
/// attaches to a uniformly chosen earlier vertex. Up to `extra_edges`
/// additional random edges are then layered on top; candidates that would
/// duplicate an existing edge or form a self-loop are skipped, so the final
/// edge count may fall short of `n - 1 + extra_edges`. Weights are uniform
/// in `1..=max_weight`.
pub fn random_connected_graph(
    n: usize,
    extra_edges: usize,
    max_weight: usize,
    seed: u64,
) -> Result<Graph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_vertices(n);
    let cap = max_weight.max(1);

    for v in 1..n {
        let u = rng.random_range(0..v);
        g.add_weighted_edge(u, v, rng.random_range(1..=cap))?;
    }

    if n < 2 {
        return Ok(g);
    }
    for _ in 0..extra_edges {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u == v || g.edge_weight(u, v).is_some() {
            continue;
        }
        g.add_weighted_edge(u, v, rng.random_range(1..=cap))?;
    }
    Ok(g)
}
