//! Credential storage and the unauthorized-response seam.
//!
//! The transport client reads a single bearer token per request and clears
//! it when the server answers 401. Where the token lives (browser-local
//! storage, a keychain, a test fixture) is the host's concern, abstracted
//! behind [`CredentialStore`]. The redirect-to-login side effect is the
//! host's concern too, abstracted behind [`UnauthorizedObserver`].

use std::sync::{Arc, RwLock};

/// Persistent store for the single bearer credential.
///
/// Read on every request, written at login, cleared on 401.
pub trait CredentialStore: Send + Sync {
    /// The current credential, if any.
    fn get(&self) -> Option<String>;

    /// Replace the credential.
    fn set(&self, token: String);

    /// Remove the credential.
    fn clear(&self);
}

/// In-memory credential store.
///
/// The default for tests and for hosts that manage persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: String) {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}

/// Observer notified after a 401 response has cleared the credential.
///
/// The host implements this to redirect the user to its login boundary.
/// Notification happens before the failed call returns to its caller.
pub trait UnauthorizedObserver: Send + Sync {
    /// Called once per unauthorized response, after the credential is cleared.
    fn on_unauthorized(&self);
}

/// Observer that does nothing.
///
/// Useful for tests and for hosts without a login boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUnauthorizedObserver;

impl UnauthorizedObserver for NoopUnauthorizedObserver {
    fn on_unauthorized(&self) {}
}
