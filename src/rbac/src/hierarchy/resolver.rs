//! Hierarchy resolver
//!
//! Answers "does `principal` inherit `target`?" by expanding the principal's
//! group memberships upward, one breadth-first level per directory round-trip.
//!
//! # Algorithm
//!
//! 1. Query the groups that list the principal as a member (depth 0).
//! 2. For each level, mark the unvisited groups visited and fetch their
//!    parents with one batched `parentOf` query (split only when the level is
//!    wider than `max_batch_size`). Every unvisited group the query returns
//!    joins the next level. Edges come from the records' `parent` and
//!    `children` fields, or from the query itself when the batch held a
//!    single group.
//! 3. A parent edge that leads back to a visited group whose ancestry reaches
//!    the group being expanded closes a cycle: it is recorded, reported, and
//!    never followed.
//! 4. Once the target shows up in a level, only the target's own ancestry is
//!    expanded further.
//! 5. The answer is `true` iff the target was reached and no cycle edge
//!    touches the target or any of its ancestors.
//!
//! All traversal state lives on the stack of one call; nothing is cached.

use super::config::ResolverConfig;
use super::graph::AncestorGraph;
use super::tracker::{CycleEdge, CycleTracker};
use crate::catalog::{DirectoryClient, EntityKind, EntityQuery, EntityRef, GroupRecord, Projection};
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::{RbacError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only, query-time group hierarchy evaluator
///
/// Cheap to clone; clones share the directory client and diagnostics sink
/// but no traversal state.
#[derive(Clone)]
pub struct HierarchyResolver {
    directory: Arc<dyn DirectoryClient>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    projection: Projection,
    config: ResolverConfig,
}

impl HierarchyResolver {
    /// Create a resolver that reports through `tracing`
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self {
            directory,
            diagnostics: Arc::new(TracingSink),
            projection: Projection::hierarchy(),
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with an injected diagnostics sink
    pub fn with_diagnostics(
        directory: Arc<dyn DirectoryClient>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            diagnostics,
            ..Self::new(directory)
        }
    }

    /// Create a resolver with an injected sink and custom configuration
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid.
    pub fn with_config(
        directory: Arc<dyn DirectoryClient>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        config: ResolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::with_diagnostics(directory, diagnostics)
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether `principal` inherits `target`, directly or transitively
    ///
    /// # Errors
    ///
    /// - `UnsupportedDomain` if a non-empty `domain` is given; no query is issued.
    /// - `Directory` if any directory query fails; no partial answer is returned.
    pub async fn has_link(
        &self,
        principal: &EntityRef,
        target: &EntityRef,
        domain: Option<&str>,
    ) -> Result<bool> {
        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            return Err(RbacError::UnsupportedDomain(domain.to_string()));
        }

        if principal == target {
            return Ok(true);
        }

        // Users are never ancestors.
        if target.is_user() {
            return Ok(false);
        }

        let mut graph = AncestorGraph::new();
        let mut tracker = CycleTracker::new();
        let mut target_reached = false;

        let direct = self
            .fetch(EntityQuery::groups_with_member(vec![principal.clone()]))
            .await?;
        let mut frontier = self.ingest(&mut graph, &direct);
        let mut depth = 0usize;

        while !frontier.is_empty() {
            if frontier.contains(target) {
                target_reached = true;
            }

            let expanding: Vec<EntityRef> = frontier
                .into_iter()
                .filter(|group| !tracker.is_visited(group))
                .filter(|group| !target_reached || graph.reaches(target, group))
                .collect();

            if expanding.is_empty() {
                break;
            }

            for group in &expanding {
                tracker.visit(group);
            }

            if self.config.trace_traversal {
                self.diagnostics.debug(&format!(
                    "hasLink {} -> {}: depth {} expanding [{}]",
                    principal,
                    target,
                    depth,
                    join_refs(&expanding)
                ));
            }

            // Every group a `parentOf` query returns is a parent of the batch,
            // whether or not its record names the relationship.
            let mut returned = BTreeSet::new();
            for batch in expanding.chunks(self.config.max_batch_size) {
                let parents = self.fetch(EntityQuery::parents_of(batch.to_vec())).await?;
                let found = self.ingest(&mut graph, &parents);
                if let [child] = batch {
                    for parent in &found {
                        graph.add_edge(child.clone(), parent.clone());
                    }
                }
                returned.extend(found);
            }

            let mut next: BTreeSet<EntityRef> = returned
                .into_iter()
                .filter(|group| !tracker.is_visited(group))
                .collect();
            let mut detected_by = None;

            for group in &expanding {
                for parent in graph.parents_of(group) {
                    if !tracker.is_visited(parent) {
                        next.insert(parent.clone());
                    } else if graph.reaches(parent, group)
                        && tracker.record(CycleEdge::new(group.clone(), parent.clone()))
                    {
                        detected_by = Some(group.clone());
                    }
                }
            }

            if let Some(group) = detected_by {
                self.diagnostics.warn(&tracker.warning(&group));
            }

            frontier = next;
            depth += 1;
        }

        if self.config.trace_traversal {
            self.diagnostics.debug(&format!(
                "hasLink {} -> {}: visited {} groups, {} edges, {} cycle edges",
                principal,
                target,
                tracker.visited_count(),
                graph.edge_count(),
                tracker.edges().len()
            ));
        }

        if !target_reached {
            return Ok(false);
        }

        // A target on or below a cycle has no trustworthy answer.
        Ok(!tracker.touches_any(&graph.ancestry(target)))
    }

    async fn fetch(&self, query: EntityQuery) -> Result<Vec<GroupRecord>> {
        Ok(self.directory.query(&query, &self.projection).await?)
    }

    /// Add the parent edges carried by `records`; returns the records' refs
    fn ingest(&self, graph: &mut AncestorGraph, records: &[GroupRecord]) -> BTreeSet<EntityRef> {
        let mut groups = BTreeSet::new();

        for record in records {
            let group = match record.entity_ref() {
                Ok(group) if group.kind() == EntityKind::Group => group,
                Ok(other) => {
                    self.diagnostics
                        .debug(&format!("Skipping non-group entity {}", other));
                    continue;
                }
                Err(e) => {
                    self.diagnostics
                        .debug(&format!("Skipping malformed group record: {}", e));
                    continue;
                }
            };

            if let Some(parent) = record.parent_ref() {
                match parent {
                    Ok(parent) => {
                        graph.add_edge(group.clone(), parent);
                    }
                    Err(e) => self
                        .diagnostics
                        .debug(&format!("Ignoring parent of {}: {}", group, e)),
                }
            }

            for child in record.child_refs() {
                match child {
                    Ok(child) => {
                        graph.add_edge(child, group.clone());
                    }
                    Err(e) => self
                        .diagnostics
                        .debug(&format!("Ignoring child of {}: {}", group, e)),
                }
            }

            groups.insert(group);
        }

        groups
    }
}

fn join_refs(refs: &[EntityRef]) -> String {
    refs.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
