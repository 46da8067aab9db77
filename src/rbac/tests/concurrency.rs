//! Concurrent resolution tests
//!
//! Calls share one resolver and directory; traversal state is per call, so
//! answers and diagnostics must not bleed between them.

mod common;

use catalog_rbac::{EntityRef, HierarchyResolver};
use common::*;
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_concurrent_calls_agree_with_sequential() {
    let f = fixture(rooted_with_cyclic_branch());
    let resolver = Arc::new(f.resolver);

    let cases = vec![
        ("mike", "team-a", false),
        ("tom", "team-b", true),
        ("tom", "root", true),
        ("mike", "team-b", false),
        ("tom", "team-a", false),
    ];

    let mut join_set = JoinSet::new();
    for round in 0..20 {
        for (principal, target, expected) in cases.clone() {
            let resolver = Arc::clone(&resolver);
            join_set.spawn(async move {
                let principal = EntityRef::user("default", principal).unwrap();
                let target = EntityRef::group("default", target).unwrap();
                let linked = resolver.has_link(&principal, &target, None).await.unwrap();
                (round, principal, target, linked, expected)
            });
        }
    }

    let mut completed = 0;
    while let Some(result) = join_set.join_next().await {
        let (round, principal, target, linked, expected) = result.unwrap();
        assert_eq!(
            linked, expected,
            "round {}: {} -> {}",
            round, principal, target
        );
        completed += 1;
    }
    assert_eq!(completed, 100);
}

#[tokio::test]
async fn test_concurrent_cycle_warnings_are_complete() {
    let f = fixture(two_cycle());
    let mike = EntityRef::user("default", "mike").unwrap();
    let team_a = EntityRef::group("default", "team-a").unwrap();

    let calls = (0..10).map(|_| f.resolver.has_link(&mike, &team_a, None));
    let results = join_all(calls).await;

    assert!(results.into_iter().all(|r| matches!(r, Ok(false))));

    // Each call reports its own cycle exactly once.
    let expected = cycle_warning("team-a", "team-b", "team-a");
    let warnings = f.sink.warnings();
    assert_eq!(warnings.len(), 10);
    assert!(warnings.iter().all(|w| *w == expected));
}

#[tokio::test]
async fn test_cloned_resolvers_share_directory() {
    let f = fixture(linear(3, "mike"));
    let clone: HierarchyResolver = f.resolver.clone();
    let mike = EntityRef::user("default", "mike").unwrap();
    let g0 = EntityRef::group("default", "g0").unwrap();

    let (a, b) = tokio::join!(
        f.resolver.has_link(&mike, &g0, None),
        clone.has_link(&mike, &g0, None)
    );

    assert!(a.unwrap());
    assert!(b.unwrap());
    assert_eq!(f.directory.query_count(), 8);
}
