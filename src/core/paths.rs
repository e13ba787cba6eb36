/*!
# All-Pairs Shortest Paths

Floyd-Warshall over the adjacency matrix, plus path reconstruction and the
textual path reports used by the graph statistics bundle.

Unreachable pairs carry the [`INF`] sentinel in the distance matrix and are
skipped by the report formatting. Vertex ids in reports are the internal
0-based ids.
*/

use crate::core::types::{Graph, INF};

/// Computes all-pairs shortest paths with the classical `O(n^3)` dynamic
/// program.
///
/// Returns the `(distances, parents)` pair. `parents[i][j]` is the
/// predecessor of `j` on the shortest path from `i`, or [`INF`] when no path
/// exists; where a direct edge exists the predecessor starts as `i` and is
/// updated to `parents[k][j]` whenever a route via `k` improves the distance.
pub fn floyd_warshall(graph: &Graph) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let n = graph.num_vertices();
    let mut dist = graph.adjacency_matrix();
    let mut parents = vec![vec![INF; n]; n];

    for i in 0..n {
        for j in 0..n {
            if dist[i][j] != INF {
                parents[i][j] = i;
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if dist[i][k] != INF && dist[k][j] != INF && dist[i][j] > dist[i][k] + dist[k][j] {
                    dist[i][j] = dist[i][k] + dist[k][j];
                    parents[i][j] = parents[k][j];
                }
            }
        }
    }

    (dist, parents)
}

/// Computes the matrices and caches them on the graph.
pub fn ensure_paths(graph: &mut Graph) {
    if graph.paths().is_none() {
        let (dist, parents) = floyd_warshall(graph);
        graph.set_paths(dist, parents);
    }
}

/// Reconstructs the shortest path from `start` to `end` by walking the
/// parent matrix backwards from `end`, then reversing.
///
/// Returns `None` when no path exists.
pub fn path_between(start: usize, end: usize, parents: &[Vec<usize>]) -> Option<Vec<usize>> {
    if start >= parents.len() || end >= parents.len() || parents[start][end] == INF {
        return None;
    }
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = parents[start][current];
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// One-line report of the shortest path between two vertices.
pub fn shortest_path(
    start: usize,
    end: usize,
    dist: &[Vec<usize>],
    parents: &[Vec<usize>],
) -> String {
    if start >= dist.len() || end >= dist.len() {
        return "Invalid vertices".to_string();
    }
    match path_between(start, end, parents) {
        None => format!("No path exists between {} and {}", start, end),
        Some(path) => {
            let hops: Vec<String> = path.iter().map(|v| v.to_string()).collect();
            format!(
                "Shortest path from {} to {} is: {} with a distance of {}",
                start,
                end,
                hops.join(" -> "),
                dist[start][end]
            )
        }
    }
}

/// Multi-line report of the shortest paths between all unordered vertex
/// pairs. Every line ends with a newline.
pub fn all_shortest_paths(dist: &[Vec<usize>], parents: &[Vec<usize>]) -> String {
    let n = dist.len();
    let mut report = String::from("The shortest paths are:\n");
    for i in 0..n {
        for j in (i + 1)..n {
            report.push_str(&shortest_path(i, j, dist, parents));
            report.push('\n');
        }
    }
    report
}
