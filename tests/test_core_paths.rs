use spantree::core::metrics::{avg_distance, longest_path, stats};
use spantree::core::paths::{all_shortest_paths, ensure_paths, floyd_warshall, path_between, shortest_path};
use spantree::core::types::{Graph, INF};

/// A path graph 0 - 1 - 2 - 3 with weights 1, 2, 3.
fn path_graph() -> Graph {
    let mut g = Graph::with_vertices(4);
    g.add_weighted_edge(0, 1, 1).unwrap();
    g.add_weighted_edge(1, 2, 2).unwrap();
    g.add_weighted_edge(2, 3, 3).unwrap();
    g
}

#[test]
fn test_distances_accumulate_along_path() {
    let (dist, _) = floyd_warshall(&path_graph());
    assert_eq!(dist[0][1], 1);
    assert_eq!(dist[0][2], 3);
    assert_eq!(dist[0][3], 6);
    assert_eq!(dist[3][0], 6);
}

#[test]
fn test_parents_allow_full_reconstruction() {
    let (_, parents) = floyd_warshall(&path_graph());
    assert_eq!(path_between(0, 3, &parents), Some(vec![0, 1, 2, 3]));
    assert_eq!(path_between(3, 0, &parents), Some(vec![3, 2, 1, 0]));
}

#[test]
fn test_shortcut_beats_long_route() {
    let mut g = path_graph();
    g.add_weighted_edge(0, 3, 4).unwrap();
    let (dist, parents) = floyd_warshall(&g);
    assert_eq!(dist[0][3], 4);
    assert_eq!(path_between(0, 3, &parents), Some(vec![0, 3]));
}

#[test]
fn test_disconnected_pairs_are_inf() {
    let mut g = Graph::with_vertices(5);
    g.add_weighted_edge(0, 1, 2).unwrap();
    g.add_weighted_edge(3, 4, 2).unwrap();
    let (dist, parents) = floyd_warshall(&g);
    assert_eq!(dist[0][3], INF);
    assert_eq!(dist[2][0], INF);
    assert!(path_between(1, 4, &parents).is_none());
}

#[test]
fn test_report_lines() {
    let (dist, parents) = floyd_warshall(&path_graph());
    assert_eq!(
        shortest_path(0, 3, &dist, &parents),
        "Shortest path from 0 to 3 is: 0 -> 1 -> 2 -> 3 with a distance of 6"
    );
    assert_eq!(shortest_path(0, 9, &dist, &parents), "Invalid vertices");

    let report = all_shortest_paths(&dist, &parents);
    assert!(report.starts_with("The shortest paths are:\n"));
    // One line per unordered pair plus the header.
    assert_eq!(report.lines().count(), 1 + 6);
}

#[test]
fn test_longest_and_average() {
    let (dist, _) = floyd_warshall(&path_graph());
    assert_eq!(longest_path(&dist), Some((0, 3, 6)));
    // Pairwise distances: 1, 3, 6, 2, 5, 3 over 6 pairs.
    assert!((avg_distance(&dist) - 20.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_stats_on_cached_and_uncached_graph() {
    let mut g = path_graph();
    let fresh = stats(&g);
    ensure_paths(&mut g);
    let cached = stats(&g);
    assert_eq!(fresh, cached);
    assert!(cached.contains("Graph with 4 vertices and 3 edges"));
    assert!(cached.contains("Total weight of edges: 6"));
}
