//! Per-call cycle tracking

use crate::catalog::EntityRef;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Remediation sentence appended to every cycle warning
pub const CYCLE_REMEDIATION: &str =
    "Admin/(catalog owner) have to fix it to make RBAC permission evaluation correct";

/// Parent edge that would lead traversal back to a visited group
///
/// `ancestor` is the group being expanded; `descendant` is the group,
/// visited earlier in the same call, that the edge points back to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CycleEdge {
    /// Group being expanded when the edge was found
    pub ancestor: EntityRef,
    /// Previously visited group the edge leads back to
    pub descendant: EntityRef,
}

impl CycleEdge {
    /// Create a cycle edge
    pub fn new(ancestor: EntityRef, descendant: EntityRef) -> Self {
        Self { ancestor, descendant }
    }

    /// Whether either endpoint is `entity`
    pub fn touches(&self, entity: &EntityRef) -> bool {
        &self.ancestor == entity || &self.descendant == entity
    }
}

/// Visited set and cycle edges of one resolution call
#[derive(Debug, Default)]
pub struct CycleTracker {
    visited: HashSet<EntityRef>,
    edges: Vec<CycleEdge>,
}

impl CycleTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a group visited; returns `false` if it already was
    pub fn visit(&mut self, group: &EntityRef) -> bool {
        self.visited.insert(group.clone())
    }

    /// Whether a group was visited in this call
    pub fn is_visited(&self, group: &EntityRef) -> bool {
        self.visited.contains(group)
    }

    /// Number of visited groups
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Record a cycle edge; returns `false` for an edge already recorded
    pub fn record(&mut self, edge: CycleEdge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Recorded edges in discovery order
    pub fn edges(&self) -> &[CycleEdge] {
        &self.edges
    }

    /// Whether any cycle was found
    pub fn has_cycles(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Whether any recorded edge touches one of `groups`
    pub fn touches_any<'a, I>(&self, groups: I) -> bool
    where
        I: IntoIterator<Item = &'a EntityRef>,
    {
        groups
            .into_iter()
            .any(|group| self.edges.iter().any(|edge| edge.touches(group)))
    }

    /// Warning text naming every edge found so far and the group being expanded
    pub fn warning(&self, expanding: &EntityRef) -> String {
        let pairs = Value::Array(
            self.edges
                .iter()
                .map(|edge| {
                    Value::Array(vec![
                        Value::String(edge.ancestor.to_string()),
                        Value::String(edge.descendant.to_string()),
                    ])
                })
                .collect(),
        );

        format!(
            "Detected cycle dependencies in the Group graph: {}. {} for group: {}",
            pairs, CYCLE_REMEDIATION, expanding
        )
    }
}
