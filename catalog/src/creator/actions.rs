//! Actions for the create-product feature.

use storefront_api::{ApiError, Category, Product};

use crate::forms::ProductForm;

/// Everything the create form reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorAction {
    /// The form view mounted; load categories for the picker.
    Opened,
    /// The form view unmounted; cancel outstanding fetches.
    Closed,
    /// The host changed the form's fields.
    FormChanged(ProductForm),
    /// Submit the form. Validation failures stop here.
    Submitted,
    /// The create mutation finished.
    SubmitFinished(Result<Product, ApiError>),
    /// The category read resolved.
    CategoriesLoaded(Result<Vec<Category>, ApiError>),
    /// The host consumed the navigation marker.
    CompletionAcknowledged,
}
