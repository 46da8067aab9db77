//! Group records returned by directory queries

use super::entity_ref::{EntityKind, EntityRef, DEFAULT_NAMESPACE};
use crate::error::Result;
use serde::{Deserialize, Serialize};

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Projected group entity as returned by a directory query
///
/// `parent` and `children` come straight from the source data. They may be
/// missing, present in only one direction, or disagree with each other; the
/// resolver treats every listed relationship as a parent edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Entity kind (always `group` for hierarchy queries)
    pub kind: EntityKind,

    /// Entity namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Entity name
    pub name: String,

    /// Parent group reference, in full or shorthand form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Child group references, in full or shorthand form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl GroupRecord {
    /// Create a group record without relationships
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Group,
            namespace: namespace.into(),
            name: name.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the parent reference
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the child references
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical reference of this record
    pub fn entity_ref(&self) -> Result<EntityRef> {
        EntityRef::new(self.kind, &self.namespace, &self.name)
    }

    /// Parent reference, resolved against this record's namespace
    pub fn parent_ref(&self) -> Option<Result<EntityRef>> {
        self.parent
            .as_deref()
            .map(|p| EntityRef::parse_with_defaults(p, EntityKind::Group, &self.namespace))
    }

    /// Child references, resolved against this record's namespace
    pub fn child_refs(&self) -> impl Iterator<Item = Result<EntityRef>> + '_ {
        self.children
            .iter()
            .map(|c| EntityRef::parse_with_defaults(c, EntityKind::Group, &self.namespace))
    }
}

/// Group entity as stored in a catalog snapshot
///
/// Unlike [`GroupRecord`] it carries the member list, which directory
/// queries match against but never return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGroup {
    /// Group name
    pub name: String,

    /// Group namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Parent group reference
    #[serde(default)]
    pub parent: Option<String>,

    /// Child group references
    #[serde(default)]
    pub children: Vec<String>,

    /// Member references; bare names default to users
    #[serde(default)]
    pub members: Vec<String>,
}

impl CatalogGroup {
    /// Create a group in the default namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: default_namespace(),
            parent: None,
            children: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Set the parent reference
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the child references
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Set the member references
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical reference of this group
    pub fn entity_ref(&self) -> Result<EntityRef> {
        EntityRef::group(&self.namespace, &self.name)
    }

    /// Member references, resolved against this group's namespace
    pub fn member_refs(&self) -> Result<Vec<EntityRef>> {
        self.members
            .iter()
            .map(|m| EntityRef::parse_with_defaults(m, EntityKind::User, &self.namespace))
            .collect()
    }

    /// Full record view (no projection applied)
    pub fn record(&self) -> GroupRecord {
        GroupRecord {
            kind: EntityKind::Group,
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            parent: self.parent.clone(),
            children: self.children.clone(),
        }
    }
}
