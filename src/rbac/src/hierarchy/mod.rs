//! Group hierarchy resolution
//!
//! Breadth-first expansion of a principal's group memberships through
//! ancestor groups, with per-call cycle detection.
//!
//! # Example
//!
//! ```rust
//! use catalog_rbac::catalog::{CatalogGroup, EntityRef, InMemoryDirectory};
//! use catalog_rbac::hierarchy::HierarchyResolver;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = InMemoryDirectory::new(vec![
//!     CatalogGroup::new("team-a"),
//!     CatalogGroup::new("team-b").with_parent("team-a").with_members(vec!["mike"]),
//! ])?;
//! let resolver = HierarchyResolver::new(Arc::new(directory));
//!
//! let mike = EntityRef::parse("user:default/mike")?;
//! let team_a = EntityRef::parse("group:default/team-a")?;
//! assert!(resolver.has_link(&mike, &team_a, None).await?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod graph;
pub mod resolver;
pub mod tracker;


pub use config::{ResolverConfig, DEFAULT_MAX_BATCH_SIZE};
pub use graph::AncestorGraph;
pub use resolver::HierarchyResolver;
pub use tracker::{CycleEdge, CycleTracker, CYCLE_REMEDIATION};
