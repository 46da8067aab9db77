//! In-memory directory backed by a catalog snapshot

use super::client::{DirectoryClient, DirectoryError};
use super::entity_ref::EntityRef;
use super::query::{EntityQuery, Field, Projection, Relation};
use super::record::{CatalogGroup, GroupRecord};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Directory client answering queries from an immutable set of groups
///
/// Parent relationships are derived from both directions: a group is the
/// parent of `x` when `x` names it as `parent` or when it lists `x` among
/// its `children`.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    groups: Vec<CatalogGroup>,
    members_index: HashMap<EntityRef, BTreeSet<usize>>,
    parents_index: HashMap<EntityRef, BTreeSet<usize>>,
    queries: AtomicUsize,
}

impl InMemoryDirectory {
    /// Build a directory from catalog groups
    ///
    /// # Errors
    ///
    /// Returns `Snapshot` if a group name is duplicated or any reference
    /// in the snapshot is malformed.
    pub fn new(groups: Vec<CatalogGroup>) -> Result<Self, DirectoryError> {
        let snapshot_err = |e: crate::error::RbacError| DirectoryError::Snapshot(e.to_string());

        let mut positions: HashMap<EntityRef, usize> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            let entity = group.entity_ref().map_err(snapshot_err)?;
            if positions.insert(entity.clone(), idx).is_some() {
                return Err(DirectoryError::Snapshot(format!("duplicate group {}", entity)));
            }
        }

        let mut members_index: HashMap<EntityRef, BTreeSet<usize>> = HashMap::new();
        let mut parents_index: HashMap<EntityRef, BTreeSet<usize>> = HashMap::new();

        for (idx, group) in groups.iter().enumerate() {
            let record = group.record();
            let entity = record.entity_ref().map_err(snapshot_err)?;

            for member in group.member_refs().map_err(snapshot_err)? {
                members_index.entry(member).or_default().insert(idx);
            }

            if let Some(parent) = record.parent_ref() {
                let parent = parent.map_err(snapshot_err)?;
                // Dangling parents have no record to return.
                if let Some(&parent_idx) = positions.get(&parent) {
                    parents_index.entry(entity.clone()).or_default().insert(parent_idx);
                }
            }

            for child in record.child_refs() {
                let child = child.map_err(snapshot_err)?;
                parents_index.entry(child).or_default().insert(idx);
            }
        }

        Ok(Self {
            groups,
            members_index,
            parents_index,
            queries: AtomicUsize::new(0),
        })
    }

    /// Build a directory from a JSON array of groups
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let groups: Vec<CatalogGroup> =
            serde_json::from_str(json).map_err(|e| DirectoryError::Snapshot(e.to_string()))?;
        Self::new(groups)
    }

    /// Load a JSON snapshot from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DirectoryError::Snapshot(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Number of groups in the snapshot
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the snapshot holds no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of queries answered so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn project(&self, idx: usize, projection: &Projection) -> GroupRecord {
        let mut record = self.groups[idx].record();
        if !projection.includes(Field::Parent) {
            record.parent = None;
        }
        if !projection.includes(Field::Children) {
            record.children.clear();
        }
        record
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn query(
        &self,
        query: &EntityQuery,
        projection: &Projection,
    ) -> Result<Vec<GroupRecord>, DirectoryError> {
        query.validate()?;
        self.queries.fetch_add(1, Ordering::Relaxed);

        let index = match &query.relation {
            Relation::HasMember(_) => &self.members_index,
            Relation::ParentOf(_) => &self.parents_index,
        };

        let matched: BTreeSet<usize> = query
            .relation
            .refs()
            .iter()
            .filter_map(|r| index.get(r))
            .flatten()
            .copied()
            .collect();

        debug!("Directory query {} matched {} groups", query, matched.len());

        Ok(matched
            .into_iter()
            .map(|idx| self.project(idx, projection))
            .filter(|record| record.kind == query.kind)
            .collect())
    }
}
