//! Error types for the catalog features.

use storefront_api::ApiError;
use thiserror::Error;

use crate::forms::FormErrors;

/// Errors produced by the catalog features.
///
/// Validation failures and transport failures travel different paths: the
/// first never reaches the network and renders on the form surface, the
/// second is logged and reconciled into form or list state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A form failed validation at the submission boundary.
    #[error("Validation failed")]
    Validation(FormErrors),

    /// A gateway call failed; the original transport error is preserved.
    #[error(transparent)]
    Transport(#[from] ApiError),
}

impl From<FormErrors> for CatalogError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

impl CatalogError {
    /// Whether this error should keep a form surface open for correction.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_the_surface_open() {
        let mut errors = FormErrors::default();
        errors.push_field("title", "Title is required");

        let error = CatalogError::from(errors);
        assert!(error.is_validation());
    }

    #[test]
    fn test_transport_errors_pass_through_unchanged() {
        let error = CatalogError::from(ApiError::Unauthorized);
        assert!(!error.is_validation());
        assert_eq!(error.to_string(), ApiError::Unauthorized.to_string());
    }
}
