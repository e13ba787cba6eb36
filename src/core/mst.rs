/*!
# Minimum Spanning Tree Strategies

This module implements the two MST strategies the servers dispatch to:

- **Prim's Algorithm:**
  A greedy approach that grows the tree from vertex `0`, selecting the next
  vertex with an indexed min-heap that supports `decrease_key` by vertex id.

- **Kruskal's Algorithm:**
  Sorts all edges by weight and uses a disjoint-set union structure to avoid
  cycles.

Both strategies require a non-empty connected input graph. The servers
validate before dispatch, and the strategies verify the result independently:
anything short of `n - 1` edges is reported as an internal error rather than
returned as a partial forest. The returned tree contains every vertex of
the input, carries `n - 1` edges, and has its all-pairs distance cache
already populated so downstream metric stages never recompute it.

Strategies are stateless and shared through a process-wide registry resolved
by name; the same instance may be invoked concurrently.

# Examples

```rust
use spantree::core::mst::mst_strategy;
use spantree::core::types::Graph;

let mut g = Graph::with_vertices(3);
g.add_weighted_edge(0, 1, 5).unwrap();
g.add_weighted_edge(1, 2, 4).unwrap();
g.add_weighted_edge(0, 2, 10).unwrap();

let prim = mst_strategy("prim").unwrap();
let tree = prim.minimum_spanning_tree(&g).unwrap();
assert_eq!(tree.total_weight(), 9);
```
*/

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::core::dsu::DisjointSet;
use crate::core::error::{Result, SpantreeError};
use crate::core::heap::IndexedMinHeap;
use crate::core::paths;
use crate::core::types::{Edge, Graph, INF};

/// A minimum spanning tree algorithm.
///
/// Implementations are stateless; one shared instance serves all callers.
pub trait MstStrategy: Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &'static str;

    /// Computes the MST of `graph`.
    ///
    /// The input must be non-empty and connected; violations surface as
    /// internal errors.
    fn minimum_spanning_tree(&self, graph: &Graph) -> Result<Graph>;
}

/// Prim's algorithm with a decrease-key min-heap.
pub struct Prim;

impl MstStrategy for Prim {
    fn name(&self) -> &'static str {
        "prim"
    }

    fn minimum_spanning_tree(&self, graph: &Graph) -> Result<Graph> {
        let n = graph.num_vertices();
        if n == 0 {
            return Err(SpantreeError::internal("MST of an empty graph"));
        }

        let mut key = vec![INF; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut in_tree = vec![false; n];
        key[0] = 0;

        let mut heap = IndexedMinHeap::with_capacity(n);
        for vertex in graph.vertices() {
            heap.push(vertex.id(), key[vertex.id()])?;
        }

        while let Some((u, _)) = heap.pop() {
            if let Some(vertex) = graph.vertex(u) {
                for (&neighbor, &weight) in vertex.adj() {
                    if !in_tree[neighbor] && weight < key[neighbor] {
                        key[neighbor] = weight;
                        heap.decrease_key(neighbor, weight)?;
                        parent[neighbor] = Some(u);
                    }
                }
            }
            in_tree[u] = true;
        }

        let mut tree = graph.vertices_only();
        for (child, p) in parent.iter().enumerate() {
            if let Some(p) = p {
                tree.add_edge(Edge::new(*p, child, key[child])?)?;
            }
        }
        if tree.num_edges() != n - 1 {
            return Err(SpantreeError::internal("MST of a disconnected graph"));
        }
        paths::ensure_paths(&mut tree);
        Ok(tree)
    }
}

/// Kruskal's algorithm over weight-sorted edges and a disjoint-set union.
pub struct Kruskal;

impl MstStrategy for Kruskal {
    fn name(&self) -> &'static str {
        "kruskal"
    }

    fn minimum_spanning_tree(&self, graph: &Graph) -> Result<Graph> {
        let n = graph.num_vertices();
        if n == 0 {
            return Err(SpantreeError::internal("MST of an empty graph"));
        }

        let mut edges: Vec<Edge> = graph.edges().collect();
        edges.sort();

        let mut dsu = DisjointSet::new(n);
        let mut tree = graph.vertices_only();
        let mut added = 0;
        for edge in edges {
            if dsu.union(edge.u(), edge.v()) {
                tree.add_edge(edge)?;
                added += 1;
                if added == n - 1 {
                    break;
                }
            }
        }
        if added != n - 1 {
            return Err(SpantreeError::internal("MST of a disconnected graph"));
        }
        paths::ensure_paths(&mut tree);
        Ok(tree)
    }
}

static REGISTRY: OnceLock<BTreeMap<&'static str, Arc<dyn MstStrategy>>> = OnceLock::new();

fn registry() -> &'static BTreeMap<&'static str, Arc<dyn MstStrategy>> {
    REGISTRY.get_or_init(|| {
        let mut strategies: BTreeMap<&'static str, Arc<dyn MstStrategy>> = BTreeMap::new();
        strategies.insert("prim", Arc::new(Prim));
        strategies.insert("kruskal", Arc::new(Kruskal));
        strategies
    })
}

/// Resolves a strategy by name from the process-wide registry.
///
/// Recognized names are `prim` and `kruskal`; anything else fails with
/// `UnknownStrategy`.
pub fn mst_strategy(name: &str) -> Result<Arc<dyn MstStrategy>> {
    registry()
        .get(name)
        .cloned()
        .ok_or_else(|| SpantreeError::unknown_strategy(name))
}

/// Names of all registered strategies.
pub fn strategy_names() -> Vec<&'static str> {
    registry().keys().copied().collect()
}
