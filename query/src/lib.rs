//! # Storefront Query
//!
//! Keyed cache of server-state reads for the Storefront client architecture.
//!
//! The query layer sits between feature reducers and the resource gateway
//! and exists to avoid redundant network traffic while keeping list and
//! detail views consistent after mutations:
//!
//! - **Automatic keying**: a read is identified by [`QueryKey`] - a logical
//!   resource name plus a canonical serialization of its parameters
//! - **De-duplication**: concurrent fetches of one key share a single
//!   in-flight request
//! - **Invalidation**: mutations mark matching entries stale without
//!   clearing their values (no UI flash); the next read refetches, and
//!   observed entries refetch in the background immediately
//! - **Last-key-wins**: a resolution superseded by a newer fetch or an
//!   invalidation is discarded rather than overwriting the newer result
//!
//! The cache is an explicit, injectable service (`Arc<QueryClient>` in the
//! feature environment), never a language-level singleton. External code
//! updates it only through invalidate-then-refetch; there is no public
//! write API for cached values.

pub mod client;
pub mod error;
pub mod key;
pub mod state;

pub use client::{CacheEvent, ObserverGuard, QueryClient};
pub use error::QueryError;
pub use key::QueryKey;
pub use state::{FetchStatus, QueryState};
