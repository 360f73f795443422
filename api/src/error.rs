//! Error types for the transport client and gateway.

use thiserror::Error;

/// Errors surfaced by the transport client and re-raised by the gateway.
///
/// Every variant carries owned strings, so errors clone cheaply into the
/// result-carrying actions the feature reducers feed back on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body could not be decoded into the expected type.
    #[error("Response decoding failed: {0}")]
    Decode(String),

    /// The server answered 401.
    ///
    /// By the time this error reaches a caller, the persisted credential
    /// has been cleared and the unauthorized observer notified.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response, with the body preserved for callers
    /// that reconcile structured rejection payloads.
    #[error("API error (status {status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Client configuration was invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Whether this error is the 401 logout case.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The HTTP status code, when the server produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Request(_) | Self::Decode(_) | Self::InvalidConfig(_) => None,
        }
    }

    /// The preserved response body, when the server produced one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
