/*!
# Graph Metrics

Derived metrics over a distance matrix (longest path, average pairwise
distance) and the human-readable statistics bundle sent back to clients
after an MST computation.
*/

use crate::core::paths;
use crate::core::types::{Graph, INF};

/// The finite off-diagonal maximum of the distance matrix as
/// `(from, to, distance)`.
///
/// Returns `None` when the matrix holds no finite off-diagonal entry (a
/// single vertex, or every pair unreachable).
pub fn longest_path(dist: &[Vec<usize>]) -> Option<(usize, usize, usize)> {
    let n = dist.len();
    let mut best: Option<(usize, usize, usize)> = None;
    for i in 0..n {
        for j in 0..n {
            if i != j && dist[i][j] != INF && best.is_none_or(|(_, _, d)| dist[i][j] > d) {
                best = Some((i, j, dist[i][j]));
            }
        }
    }
    best
}

/// One-line report of the longest shortest path.
pub fn longest_path_report(dist: &[Vec<usize>]) -> String {
    let (from, to, distance) = longest_path(dist).unwrap_or((0, 0, 0));
    format!(
        "Longest path is from {} to {} with a distance of {}",
        from, to, distance
    )
}

/// Average pairwise distance, self-pairs excluded.
///
/// Sums the finite entries of the upper triangle including the diagonal,
/// then removes the `n` self-distances from the pair count before dividing.
/// Unreachable pairs are filtered out entirely.
pub fn avg_distance(dist: &[Vec<usize>]) -> f64 {
    let n = dist.len();
    let mut total = 0usize;
    let mut count = 0usize;
    for i in 0..n {
        for j in i..n {
            if dist[i][j] != INF {
                total += dist[i][j];
                count += 1;
            }
        }
    }
    // The diagonal contributes n zero-distance entries; drop them from the
    // denominator.
    count = count.saturating_sub(n);
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// Assembles the statistics bundle: vertex and edge counts, total weight,
/// longest path, average distance, and all pairwise shortest paths.
///
/// Uses the graph's cached matrices when present; otherwise computes them
/// on the fly without storing.
pub fn stats(graph: &Graph) -> String {
    let computed;
    let (dist, parents) = match graph.paths() {
        Some((d, p)) => (d, p),
        None => {
            computed = paths::floyd_warshall(graph);
            (&computed.0, &computed.1)
        }
    };

    let mut report = format!(
        "Graph with {} vertices and {} edges\n",
        graph.num_vertices(),
        graph.num_edges()
    );
    report.push_str(&format!("Total weight of edges: {}\n", graph.total_weight()));
    report.push_str(&longest_path_report(dist));
    report.push('\n');
    report.push_str(&format!(
        "The average distance between vertices is: {:.2}\n",
        avg_distance(dist)
    ));
    report.push_str(&paths::all_shortest_paths(dist, parents));
    report
}
