//! Server configuration
//!
//! Environment variables:
//! - `PORT` - HTTP server port (default: 8080)
//! - `CATALOG_SNAPSHOT` - path to the catalog snapshot JSON (required)
//! - `RBAC_MAX_BATCH_SIZE` - refs per `parentOf` query (default: 100)
//! - `RBAC_TRACE_TRAVERSAL` - per-round traversal tracing (default: false)
//! - `RUST_LOG` - log filter (default: info)

use crate::error::{RbacError, Result};
use crate::hierarchy::ResolverConfig;
use std::path::PathBuf;
use std::str::FromStr;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration of the `rbac-server` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,
    /// Catalog snapshot backing the in-memory directory
    pub catalog_snapshot: PathBuf,
    /// Resolver settings
    pub resolver: ResolverConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `Config` when `CATALOG_SNAPSHOT` is missing or a value does not
    /// parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let catalog_snapshot = lookup("CATALOG_SNAPSHOT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| RbacError::Config("CATALOG_SNAPSHOT must be set".to_string()))?;

        let defaults = ResolverConfig::default();
        let resolver = ResolverConfig::default()
            .with_max_batch_size(parse_or(
                &lookup,
                "RBAC_MAX_BATCH_SIZE",
                defaults.max_batch_size,
            )?)
            .with_trace_traversal(parse_or(
                &lookup,
                "RBAC_TRACE_TRAVERSAL",
                defaults.trace_traversal,
            )?);
        resolver.validate()?;

        Ok(Self {
            port,
            catalog_snapshot,
            resolver,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| RbacError::Config(format!("{}='{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
