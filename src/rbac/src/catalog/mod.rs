//! Entity directory model and client seam
//!
//! Canonical entity references, the projected group records the resolver
//! consumes, the closed set of relation predicates it queries with, and the
//! [`DirectoryClient`] trait behind which the real catalog lives.
//! [`InMemoryDirectory`] answers the same queries from a JSON snapshot.

pub mod client;
pub mod entity_ref;
pub mod memory;
pub mod query;
pub mod record;

pub use client::{DirectoryClient, DirectoryError};
pub use entity_ref::{EntityKind, EntityRef, DEFAULT_NAMESPACE};
pub use memory::InMemoryDirectory;
pub use query::{EntityQuery, Field, Projection, Relation};
pub use record::{CatalogGroup, GroupRecord};
