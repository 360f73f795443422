//! Error types for the query cache layer.

use storefront_api::ApiError;
use thiserror::Error;

/// Errors surfaced by [`QueryClient`](crate::QueryClient) reads.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The underlying fetch failed. Passed through unchanged so callers
    /// can still classify (unauthorized, status + body, network).
    #[error("Fetch failed: {0}")]
    Fetch(#[from] ApiError),

    /// A cached value did not deserialize into the requested type.
    ///
    /// Indicates two reads sharing one key with different types - a
    /// programming error, not a runtime condition to branch on.
    #[error("Cached value deserialization failed: {0}")]
    Deserialize(String),
}
