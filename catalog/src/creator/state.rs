//! State for the create-product feature.

use storefront_api::Category;

use crate::forms::{FormErrors, ProductForm};
use crate::products::state::LoadStatus;

/// State of the create-product form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatorState {
    /// The editable fields.
    pub form: ProductForm,
    /// Validation and reconciliation errors.
    pub errors: FormErrors,
    /// True while the create mutation is in flight.
    pub submitting: bool,
    /// Navigation marker: set on successful create, consumed by the host
    /// (which navigates to the list view and acknowledges).
    pub completed: bool,
    /// Categories for the form's picker.
    pub categories: Vec<Category>,
    /// Category load status.
    pub categories_status: LoadStatus,
}

impl CreatorState {
    /// Whether the form can currently be submitted.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.submitting && !self.completed
    }
}
