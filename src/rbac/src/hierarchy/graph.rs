//! Call-local ancestor graph
//!
//! Collects the parent edges learned from group records during one
//! resolution call. Walks are iterative, so depth is bounded by memory
//! rather than by the call stack.

use crate::catalog::EntityRef;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Upward (child → parents) adjacency learned during one call
#[derive(Debug, Default)]
pub struct AncestorGraph {
    parents: HashMap<EntityRef, BTreeSet<EntityRef>>,
}

impl AncestorGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `parent` is a parent of `child`
    ///
    /// Returns `false` if the edge was already known.
    pub fn add_edge(&mut self, child: EntityRef, parent: EntityRef) -> bool {
        self.parents.entry(child).or_default().insert(parent)
    }

    /// Known parents of a group
    pub fn parents_of<'a>(&'a self, child: &EntityRef) -> impl Iterator<Item = &'a EntityRef> + 'a {
        self.parents.get(child).into_iter().flatten()
    }

    /// Whether walking upward from `from` reaches `to`
    ///
    /// Every node reaches itself.
    pub fn reaches(&self, from: &EntityRef, to: &EntityRef) -> bool {
        if from == to {
            return true;
        }

        let mut seen: HashSet<&EntityRef> = HashSet::new();
        let mut stack: Vec<&EntityRef> = vec![from];

        while let Some(node) = stack.pop() {
            for parent in self.parents_of(node) {
                if parent == to {
                    return true;
                }
                if seen.insert(parent) {
                    stack.push(parent);
                }
            }
        }

        false
    }

    /// `start` and every ancestor reachable from it
    pub fn ancestry(&self, start: &EntityRef) -> BTreeSet<EntityRef> {
        let mut closure = BTreeSet::new();
        let mut stack = vec![start.clone()];

        while let Some(node) = stack.pop() {
            if !closure.insert(node.clone()) {
                continue;
            }
            stack.extend(self.parents_of(&node).cloned());
        }

        closure
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.parents.values().map(BTreeSet::len).sum()
    }
}
