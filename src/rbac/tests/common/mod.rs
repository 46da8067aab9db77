//! Shared fixtures for integration tests

#![allow(dead_code)]

use catalog_rbac::{CatalogGroup, HierarchyResolver, InMemoryDirectory, MemorySink};
use std::sync::Arc;

/// Resolver over an in-memory snapshot, reporting into a memory sink
pub struct Fixture {
    pub directory: Arc<InMemoryDirectory>,
    pub sink: Arc<MemorySink>,
    pub resolver: HierarchyResolver,
}

pub fn fixture(groups: Vec<CatalogGroup>) -> Fixture {
    let directory = Arc::new(InMemoryDirectory::new(groups).expect("valid snapshot"));
    let sink = Arc::new(MemorySink::new());
    let resolver = HierarchyResolver::with_diagnostics(directory.clone(), sink.clone());
    Fixture {
        directory,
        sink,
        resolver,
    }
}

/// team-a <- team-b <- mike, plus an unrelated team-c with tom
pub fn chain() -> Vec<CatalogGroup> {
    vec![
        CatalogGroup::new("team-a"),
        CatalogGroup::new("team-b")
            .with_parent("team-a")
            .with_members(vec!["mike"]),
        CatalogGroup::new("team-c").with_members(vec!["tom"]),
    ]
}

/// team-a <-> team-b, mike in team-b
pub fn two_cycle() -> Vec<CatalogGroup> {
    vec![
        CatalogGroup::new("team-a").with_parent("team-b"),
        CatalogGroup::new("team-b")
            .with_parent("team-a")
            .with_members(vec!["mike"]),
    ]
}

/// team-c (parent team-a) and team-d (parent team-b), mike in both
pub fn multi_parent() -> Vec<CatalogGroup> {
    vec![
        CatalogGroup::new("team-a"),
        CatalogGroup::new("team-b"),
        CatalogGroup::new("team-c")
            .with_parent("team-a")
            .with_members(vec!["mike"]),
        CatalogGroup::new("team-d")
            .with_parent("team-b")
            .with_members(vec!["mike"]),
    ]
}

//              root
//            /      \
//        team-a    team-b
//        |    ^       |
//        v    |       |
//        team-c     team-d
//          |          |
//        mike        tom
pub fn rooted_with_cyclic_branch() -> Vec<CatalogGroup> {
    vec![
        CatalogGroup::new("root"),
        CatalogGroup::new("team-a").with_parent("root"),
        CatalogGroup::new("team-b").with_parent("root"),
        CatalogGroup::new("team-c")
            .with_parent("team-a")
            .with_children(vec!["team-a"])
            .with_members(vec!["mike"]),
        CatalogGroup::new("team-d")
            .with_parent("team-b")
            .with_members(vec!["tom"]),
    ]
}

/// Linear chain g0 <- g1 <- ... <- g(n-1), with `member` in g(n-1)
pub fn linear(n: usize, member: &str) -> Vec<CatalogGroup> {
    (0..n)
        .map(|i| {
            let group = CatalogGroup::new(format!("g{}", i));
            let group = if i > 0 {
                group.with_parent(format!("g{}", i - 1))
            } else {
                group
            };
            if i == n - 1 {
                group.with_members(vec![member.to_string()])
            } else {
                group
            }
        })
        .collect()
}

pub fn cycle_warning(ancestor: &str, descendant: &str, expanding: &str) -> String {
    format!(
        "Detected cycle dependencies in the Group graph: \
         [[\"group:default/{}\",\"group:default/{}\"]]. \
         Admin/(catalog owner) have to fix it to make RBAC permission \
         evaluation correct for group: group:default/{}",
        ancestor, descendant, expanding
    )
}
