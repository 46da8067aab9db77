//! Canonical entity references
//!
//! An entity reference names a directory entity as `<kind>:<namespace>/<name>`,
//! e.g. `user:default/mike` or `group:default/team-a`. References compare
//! case-insensitively, so every component is lower-cased on construction and
//! two references are equal iff their canonical strings are equal.

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace assumed when a reference omits it
pub const DEFAULT_NAMESPACE: &str = "default";

/// Kind of a directory entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A group; may have members, a parent and children
    Group,
    /// A user; only ever a principal, never an ancestor
    User,
}

impl EntityKind {
    /// Lower-case token used in the textual reference form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "group" => Ok(Self::Group),
            "user" => Ok(Self::User),
            other => Err(RbacError::InvalidRef(format!("unknown entity kind '{}'", other))),
        }
    }
}

/// Canonical, immutable reference to a directory entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityRef {
    kind: EntityKind,
    namespace: String,
    name: String,
}

impl EntityRef {
    /// Build a reference from its parts
    ///
    /// # Errors
    ///
    /// Returns `InvalidRef` if the namespace or name is empty or contains
    /// one of the separators `:` and `/`.
    pub fn new(kind: EntityKind, namespace: &str, name: &str) -> Result<Self> {
        Ok(Self {
            kind,
            namespace: normalize_part("namespace", namespace)?,
            name: normalize_part("name", name)?,
        })
    }

    /// Shorthand for a group in the given namespace
    pub fn group(namespace: &str, name: &str) -> Result<Self> {
        Self::new(EntityKind::Group, namespace, name)
    }

    /// Shorthand for a user in the given namespace
    pub fn user(namespace: &str, name: &str) -> Result<Self> {
        Self::new(EntityKind::User, namespace, name)
    }

    /// Parse a reference, falling back to the given kind and namespace
    ///
    /// Accepts `kind:namespace/name`, `kind:name`, `namespace/name` and bare
    /// `name`. Group records list their parent and children in any of these
    /// forms.
    pub fn parse_with_defaults(
        text: &str,
        default_kind: EntityKind,
        default_namespace: &str,
    ) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RbacError::InvalidRef("reference cannot be empty".to_string()));
        }

        let (kind, rest) = match text.split_once(':') {
            Some((kind, rest)) => (kind.parse::<EntityKind>()?, rest),
            None => (default_kind, text),
        };

        let (namespace, name) = match rest.split_once('/') {
            Some((namespace, name)) => (namespace, name),
            None => (default_namespace, rest),
        };

        Self::new(kind, namespace, name)
    }

    /// Parse a reference that names its kind explicitly
    ///
    /// The namespace may be omitted and defaults to [`DEFAULT_NAMESPACE`].
    pub fn parse(text: &str) -> Result<Self> {
        if !text.contains(':') {
            return Err(RbacError::InvalidRef(format!(
                "'{}' is missing the kind prefix",
                text
            )));
        }
        Self::parse_with_defaults(text, EntityKind::Group, DEFAULT_NAMESPACE)
    }

    /// Entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Entity namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this reference names a user
    pub fn is_user(&self) -> bool {
        self.kind == EntityKind::User
    }

    /// Canonical `kind:namespace/name` string
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

fn normalize_part(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RbacError::InvalidRef(format!("{} cannot be empty", label)));
    }
    if value.contains(':') || value.contains('/') {
        return Err(RbacError::InvalidRef(format!(
            "{} '{}' contains a reserved separator",
            label, value
        )));
    }
    Ok(value.to_lowercase())
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.kind, self.namespace, self.name)
    }
}

impl FromStr for EntityRef {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityRef {
    type Error = RbacError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<EntityRef> for String {
    fn from(value: EntityRef) -> Self {
        value.to_string()
    }
}
