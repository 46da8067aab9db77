//! Directory query predicates and projections

use super::entity_ref::{EntityKind, EntityRef};
use super::client::DirectoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation predicate supported by hierarchy queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "relation", content = "refs")]
pub enum Relation {
    /// Entities listing any of the refs as a member
    #[serde(rename = "relations.hasMember")]
    HasMember(Vec<EntityRef>),

    /// Entities that are an immediate parent of any of the refs
    #[serde(rename = "relations.parentOf")]
    ParentOf(Vec<EntityRef>),
}

impl Relation {
    /// Catalog filter key for this relation
    pub fn key(&self) -> &'static str {
        match self {
            Self::HasMember(_) => "relations.hasMember",
            Self::ParentOf(_) => "relations.parentOf",
        }
    }

    /// Refs the relation is matched against
    pub fn refs(&self) -> &[EntityRef] {
        match self {
            Self::HasMember(refs) | Self::ParentOf(refs) => refs,
        }
    }
}

/// Entity query: kind equality plus one relation predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityQuery {
    /// Required entity kind
    pub kind: EntityKind,

    /// Relation predicate
    #[serde(flatten)]
    pub relation: Relation,
}

impl EntityQuery {
    /// Groups that have any of the given entities as a member
    pub fn groups_with_member(members: Vec<EntityRef>) -> Self {
        Self {
            kind: EntityKind::Group,
            relation: Relation::HasMember(members),
        }
    }

    /// Groups that are a parent of any of the given groups
    pub fn parents_of(groups: Vec<EntityRef>) -> Self {
        Self {
            kind: EntityKind::Group,
            relation: Relation::ParentOf(groups),
        }
    }

    /// Reject queries that could not be answered meaningfully
    pub fn validate(&self) -> Result<(), DirectoryError> {
        if self.relation.refs().is_empty() {
            return Err(DirectoryError::InvalidQuery(format!(
                "{} requires at least one entity ref",
                self.relation.key()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for EntityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let refs: Vec<String> = self.relation.refs().iter().map(|r| r.to_string()).collect();
        write!(f, "kind={} {}=[{}]", self.kind, self.relation.key(), refs.join(","))
    }
}

/// Entity field selectable by a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// `metadata.name`
    #[serde(rename = "metadata.name")]
    Name,
    /// `kind`
    #[serde(rename = "kind")]
    Kind,
    /// `metadata.namespace`
    #[serde(rename = "metadata.namespace")]
    Namespace,
    /// `spec.parent`
    #[serde(rename = "spec.parent")]
    Parent,
    /// `spec.children`
    #[serde(rename = "spec.children")]
    Children,
}

impl Field {
    /// Catalog field path
    pub fn path(&self) -> &'static str {
        match self {
            Self::Name => "metadata.name",
            Self::Kind => "kind",
            Self::Namespace => "metadata.namespace",
            Self::Parent => "spec.parent",
            Self::Children => "spec.children",
        }
    }
}

/// Set of fields a query returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    fields: Vec<Field>,
}

impl Projection {
    /// Exactly the fields hierarchy traversal needs
    pub fn hierarchy() -> Self {
        Self {
            fields: vec![
                Field::Name,
                Field::Kind,
                Field::Namespace,
                Field::Parent,
                Field::Children,
            ],
        }
    }

    /// Selected fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether a field is selected
    pub fn includes(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}
