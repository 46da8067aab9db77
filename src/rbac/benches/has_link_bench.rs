//! Inheritance resolution benchmarks
//!
//! Measures `has_link` against snapshot-backed directories of increasing
//! depth and breadth. Directory latency is zero here, so the numbers reflect
//! traversal and cycle bookkeeping only.

use catalog_rbac::{
    CatalogGroup, EntityRef, HierarchyResolver, InMemoryDirectory, MemorySink,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// g0 <- g1 <- ... <- g(depth-1), with mike in the deepest group
fn create_chain(depth: usize) -> Vec<CatalogGroup> {
    (0..depth)
        .map(|i| {
            let mut group = CatalogGroup::new(format!("g{}", i));
            if i > 0 {
                group = group.with_parent(format!("g{}", i - 1));
            }
            if i == depth - 1 {
                group = group.with_members(vec!["mike"]);
            }
            group
        })
        .collect()
}

/// `width` leaf groups under one root, mike a member of every leaf
fn create_fan(width: usize) -> Vec<CatalogGroup> {
    let mut groups = vec![CatalogGroup::new("root")];
    groups.extend((0..width).map(|i| {
        CatalogGroup::new(format!("leaf-{}", i))
            .with_parent("root")
            .with_members(vec!["mike"])
    }));
    groups
}

fn resolver_for(groups: Vec<CatalogGroup>) -> HierarchyResolver {
    let directory = InMemoryDirectory::new(groups).unwrap();
    HierarchyResolver::with_diagnostics(Arc::new(directory), Arc::new(MemorySink::new()))
}

fn bench_chain_depth(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("has_link_chain");
    let mike = EntityRef::user("default", "mike").unwrap();
    let top = EntityRef::group("default", "g0").unwrap();

    for depth in [1, 10, 100].iter() {
        let resolver = resolver_for(create_chain(*depth));
        group.bench_with_input(BenchmarkId::new("depth", depth), depth, |b, _| {
            b.to_async(&rt).iter(|| async {
                let linked = resolver
                    .has_link(black_box(&mike), black_box(&top), None)
                    .await
                    .unwrap();
                black_box(linked);
            });
        });
    }

    group.finish();
}

fn bench_frontier_width(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("has_link_fan");
    let mike = EntityRef::user("default", "mike").unwrap();
    let root = EntityRef::group("default", "root").unwrap();

    for width in [10, 100, 1000].iter() {
        let resolver = resolver_for(create_fan(*width));
        group.bench_with_input(BenchmarkId::new("width", width), width, |b, _| {
            b.to_async(&rt).iter(|| async {
                let linked = resolver
                    .has_link(black_box(&mike), black_box(&root), None)
                    .await
                    .unwrap();
                black_box(linked);
            });
        });
    }

    group.finish();
}

fn bench_cyclic_graph(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = resolver_for(vec![
        CatalogGroup::new("team-a").with_parent("team-b"),
        CatalogGroup::new("team-b")
            .with_parent("team-a")
            .with_members(vec!["mike"]),
    ]);
    let mike = EntityRef::user("default", "mike").unwrap();
    let team_a = EntityRef::group("default", "team-a").unwrap();

    c.bench_function("has_link_two_cycle", |b| {
        b.to_async(&rt).iter(|| async {
            let linked = resolver
                .has_link(black_box(&mike), black_box(&team_a), None)
                .await
                .unwrap();
            black_box(linked);
        });
    });
}

criterion_group!(
    benches,
    bench_chain_depth,
    bench_frontier_width,
    bench_cyclic_graph
);
criterion_main!(benches);
