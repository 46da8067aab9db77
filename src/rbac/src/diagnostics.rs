//! Diagnostics sinks
//!
//! The resolver reports cycle warnings and traversal traces through a sink
//! handed to it at construction instead of a process-wide logger.

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Receiver of resolver diagnostics
pub trait DiagnosticsSink: Send + Sync {
    /// Report a warning
    fn warn(&self, message: &str);

    /// Report a debug trace line
    fn debug(&self, message: &str);
}

/// Sink forwarding to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn warn(&self, message: &str) {
        warn!(target: "catalog_rbac::hierarchy", "{}", message);
    }

    fn debug(&self, message: &str) {
        debug!(target: "catalog_rbac::hierarchy", "{}", message);
    }
}

/// Severity of a recorded diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warning
    Warn,
    /// Debug trace
    Debug,
}

/// Sink recording every message in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded warnings, oldest first
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warn)
    }

    /// Recorded debug lines, oldest first
    pub fn debug_lines(&self) -> Vec<String> {
        self.messages(Severity::Debug)
    }

    /// Drop every recorded message
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn warn(&self, message: &str) {
        self.entries.lock().push((Severity::Warn, message.to_string()));
    }

    fn debug(&self, message: &str) {
        self.entries.lock().push((Severity::Debug, message.to_string()));
    }
}
