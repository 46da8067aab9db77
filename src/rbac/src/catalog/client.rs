//! Directory client seam

use super::query::{EntityQuery, Projection};
use super::record::GroupRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a directory client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory could not be reached
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// The request failed in transit
    #[error("transport failure: {0}")]
    Transport(String),

    /// The query was rejected before execution
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A catalog snapshot could not be loaded
    #[error("invalid catalog snapshot: {0}")]
    Snapshot(String),
}

/// Entity directory consulted by the hierarchy resolver
///
/// Implementations own connection pooling, retries and timeouts. The
/// resolver issues queries one at a time and never retries a failure.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Return the group records matching `query`, restricted to `projection`
    async fn query(
        &self,
        query: &EntityQuery,
        projection: &Projection,
    ) -> Result<Vec<GroupRecord>, DirectoryError>;
}
