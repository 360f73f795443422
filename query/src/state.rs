//! Observable state of a cached read.

/// Fetch status of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch has been issued for this key.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch resolved.
    Success,
    /// The last fetch failed. `data` keeps its last good value, if any.
    Error,
}

/// Snapshot of a cached read for one key, typed at the edge.
///
/// `is_pending` is true only from the first fetch until the first
/// resolution for the key - later refetches serve the cached value while
/// revalidating, so the host can keep rendering data instead of a
/// skeleton. `status` distinguishes a key that was never requested
/// ([`FetchStatus::Idle`], where `is_pending` is also false) from one that
/// resolved.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Last-known value, surviving later failed fetches.
    pub data: Option<T>,
    /// True from the first fetch until the first resolution for this key.
    pub is_pending: bool,
    /// Message of the most recent failure, cleared on success.
    pub error: Option<String>,
    /// True when the entry has been invalidated and not yet refetched.
    pub is_invalidated: bool,
    /// Lifecycle position of the entry. `Idle` means never requested.
    pub status: FetchStatus,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_pending: false,
            error: None,
            is_invalidated: false,
            status: FetchStatus::Idle,
        }
    }
}

impl<T> QueryState<T> {
    /// Whether the last fetch failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
