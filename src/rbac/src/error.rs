//! Error types for the catalog RBAC role manager

use crate::catalog::DirectoryError;
use thiserror::Error;

/// Role manager errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// A domain argument was supplied; group inheritance has no domain scoping
    #[error("domain argument is not supported.")]
    UnsupportedDomain(String),

    /// Operation outside the read-only, async-only capability surface
    #[error("Method \"{method}\" not implemented.")]
    NotImplemented {
        /// Name of the rejected method
        method: &'static str,
    },

    /// Malformed entity reference
    #[error("Invalid entity reference: {0}")]
    InvalidRef(String),

    /// Directory query failed
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RbacError {
    /// Shorthand for a capability-stub failure
    pub fn not_implemented(method: &'static str) -> Self {
        Self::NotImplemented { method }
    }
}

/// Result type for role manager operations
pub type Result<T> = std::result::Result<T, RbacError>;
