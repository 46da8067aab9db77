//! Role manager surface
//!
//! Policy engines talk to group inheritance through [`RoleManager`]. The
//! catalog-backed implementation is read-only and async-only: it answers
//! `has_link` from the entity directory and rejects every mutation,
//! enumeration and synchronous call.

use crate::catalog::{DirectoryClient, EntityRef};
use crate::error::{RbacError, Result};
use crate::hierarchy::HierarchyResolver;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Role manager contract consumed by policy engines
#[async_trait]
pub trait RoleManager: Send + Sync {
    /// Whether `name1` inherits `name2`
    async fn has_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<bool>;

    /// Add an inheritance link
    async fn add_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<()>;

    /// Remove an inheritance link
    async fn delete_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<()>;

    /// Roles inherited by `name`
    async fn get_roles(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>>;

    /// Users inheriting `name`
    async fn get_users(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>>;

    /// Blocking variant of [`RoleManager::has_link`]
    fn synced_has_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<bool>;
}

/// Role manager backed by the catalog group hierarchy
#[derive(Clone)]
pub struct CatalogRoleManager {
    resolver: HierarchyResolver,
}

impl CatalogRoleManager {
    /// Wrap an existing resolver
    pub fn new(resolver: HierarchyResolver) -> Self {
        Self { resolver }
    }

    /// Build a manager over a directory with default settings
    pub fn from_directory(directory: Arc<dyn DirectoryClient>) -> Self {
        Self::new(HierarchyResolver::new(directory))
    }

    /// Underlying resolver
    pub fn resolver(&self) -> &HierarchyResolver {
        &self.resolver
    }
}

#[async_trait]
impl RoleManager for CatalogRoleManager {
    async fn has_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<bool> {
        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            return Err(RbacError::UnsupportedDomain(domain.to_string()));
        }

        let principal = EntityRef::parse(name1)?;
        let target = EntityRef::parse(name2)?;

        let linked = self.resolver.has_link(&principal, &target, None).await?;
        debug!("hasLink {} -> {} = {}", principal, target, linked);
        Ok(linked)
    }

    async fn add_link(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<()> {
        Err(RbacError::not_implemented("addLink"))
    }

    async fn delete_link(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<()> {
        Err(RbacError::not_implemented("deleteLink"))
    }

    async fn get_roles(&self, _name: &str, _domain: Option<&str>) -> Result<Vec<String>> {
        Err(RbacError::not_implemented("getRoles"))
    }

    async fn get_users(&self, _name: &str, _domain: Option<&str>) -> Result<Vec<String>> {
        Err(RbacError::not_implemented("getUsers"))
    }

    fn synced_has_link(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<bool> {
        Err(RbacError::not_implemented("syncedHasLink"))
    }
}
