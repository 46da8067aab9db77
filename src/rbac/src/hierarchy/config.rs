//! Configuration for the hierarchy resolver.

use crate::error::{RbacError, Result};

/// Default cap on refs per `parentOf` query.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Configuration for the hierarchy resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of group refs sent in one `parentOf` query.
    ///
    /// A frontier wider than this is split into several queries within the
    /// same round; the answer does not depend on the value.
    pub max_batch_size: usize,
    /// Emit a debug line per traversal round through the diagnostics sink.
    pub trace_traversal: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            trace_traversal: false,
        }
    }
}

impl ResolverConfig {
    /// Sets the maximum `parentOf` batch size.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Enables or disables per-round traversal tracing.
    pub fn with_trace_traversal(mut self, trace_traversal: bool) -> Self {
        self.trace_traversal = trace_traversal;
        self
    }

    /// Rejects settings the resolver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(RbacError::Config(
                "max_batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
