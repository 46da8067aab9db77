//! # Catalog RBAC Role Manager
//!
//! Group-inheritance resolution for RBAC policy evaluation, backed by a
//! software-catalog entity directory.
//!
//! ## Features
//!
//! - **Breadth-first expansion** of a principal's groups through ancestor groups
//! - **Batched directory queries**: one `parentOf` round-trip per hierarchy level
//! - **Cycle detection** with warnings that name the offending edges
//! - **Fail-closed** answers for any target on or below a cycle
//! - **Async-first design** using Tokio runtime
//!
//! ## Example
//!
//! ```rust
//! use catalog_rbac::{CatalogGroup, CatalogRoleManager, InMemoryDirectory, RoleManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = InMemoryDirectory::new(vec![
//!         CatalogGroup::new("engineering"),
//!         CatalogGroup::new("platform")
//!             .with_parent("engineering")
//!             .with_members(vec!["alice"]),
//!     ])?;
//!     let manager = CatalogRoleManager::from_directory(Arc::new(directory));
//!
//!     if manager
//!         .has_link("user:default/alice", "group:default/engineering", None)
//!         .await?
//!     {
//!         println!("alice inherits engineering");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hierarchy;
pub mod http;
pub mod manager;

// Re-export commonly used types
pub use catalog::{
    CatalogGroup, DirectoryClient, DirectoryError, EntityKind, EntityQuery, EntityRef,
    GroupRecord, InMemoryDirectory, Projection, Relation,
};
pub use config::ServerConfig;
pub use diagnostics::{DiagnosticsSink, MemorySink, TracingSink};
pub use error::{RbacError, Result};
pub use hierarchy::{HierarchyResolver, ResolverConfig};
pub use manager::{CatalogRoleManager, RoleManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
