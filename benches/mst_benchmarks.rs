/*!
# Performance Benchmarks for Spantree

This module contains criterion-based benchmarks to measure performance
and detect regressions in the graph structures and MST strategies.
*/

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use spantree::core::generators::{complete_graph, random_connected_graph};
use spantree::core::mst::{Kruskal, MstStrategy, Prim};
use spantree::core::paths::floyd_warshall;

// ============================================================================
// MST Strategy Benchmarks
// ============================================================================

fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim_mst");

    for size in [50, 100, 200].iter() {
        let graph = random_connected_graph(*size, size * 4, 100, 42).unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let tree = Prim.minimum_spanning_tree(graph).unwrap();
                black_box(tree)
            });
        });
    }
    group.finish();
}

fn bench_kruskal(c: &mut Criterion) {
    let mut group = c.benchmark_group("kruskal_mst");

    for size in [50, 100, 200].iter() {
        let graph = random_connected_graph(*size, size * 4, 100, 42).unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let tree = Kruskal.minimum_spanning_tree(graph).unwrap();
                black_box(tree)
            });
        });
    }
    group.finish();
}

fn bench_mst_on_dense_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst_dense");

    for size in [25, 50, 100].iter() {
        let graph = complete_graph(*size, 100).unwrap();
        group.bench_with_input(
            BenchmarkId::new("prim", size),
            &graph,
            |b, graph| {
                b.iter(|| black_box(Prim.minimum_spanning_tree(graph).unwrap()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("kruskal", size),
            &graph,
            |b, graph| {
                b.iter(|| black_box(Kruskal.minimum_spanning_tree(graph).unwrap()));
            },
        );
    }
    group.finish();
}

// ============================================================================
// All-Pairs Shortest Paths Benchmarks
// ============================================================================

fn bench_floyd_warshall(c: &mut Criterion) {
    let mut group = c.benchmark_group("floyd_warshall");

    for size in [25, 50, 100].iter() {
        let graph = random_connected_graph(*size, size * 2, 100, 7).unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(floyd_warshall(graph)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_prim,
    bench_kruskal,
    bench_mst_on_dense_graphs,
    bench_floyd_warshall
);
criterion_main!(benches);
