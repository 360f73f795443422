//! Actions for the products list feature.
//!
//! User intents and effect results in one vocabulary. Effect results carry
//! `Result<_, ApiError>` so the reducer owns all reconciliation; actions
//! stay `Clone` for the store's broadcast channel.

use storefront_api::{ApiError, Category, ListQuery, Product, ProductPage};

use crate::forms::ProductForm;

/// Everything the products list reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductsAction {
    // ═══════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════
    /// The list view mounted; load the current page.
    Opened,
    /// The list view unmounted; cancel outstanding timers and fetches.
    Closed,

    // ═══════════════════════════════════════════════════════════════════
    // Search
    // ═══════════════════════════════════════════════════════════════════
    /// A keystroke in the search input. Starts (or replaces) the debounce
    /// timer; does not fetch.
    QueryEdited(String),
    /// The debounce timer fired with the final value of a burst.
    SearchCommitted(String),

    // ═══════════════════════════════════════════════════════════════════
    // Pagination
    // ═══════════════════════════════════════════════════════════════════
    /// Jump to a page (1-based).
    SetPage(u32),
    /// Advance one page; no-op on the last page.
    NextPage,
    /// Go back one page; no-op on the first page.
    PreviousPage,

    // ═══════════════════════════════════════════════════════════════════
    // Effect results: list and categories
    // ═══════════════════════════════════════════════════════════════════
    /// A list read resolved. `request` identifies which read, so stale
    /// resolutions are discarded against the current query.
    ListLoaded {
        /// The parameters this read was keyed by.
        request: ListQuery,
        /// The page, or the transport failure.
        result: Result<ProductPage, ApiError>,
    },
    /// Load categories for the edit form's picker.
    CategoriesRequested,
    /// The category read resolved.
    CategoriesLoaded(Result<Vec<Category>, ApiError>),

    // ═══════════════════════════════════════════════════════════════════
    // Detail selection
    // ═══════════════════════════════════════════════════════════════════
    /// Select a record by slug, loading it through the cache.
    DetailRequested {
        /// Slug of the requested record.
        slug: String,
    },
    /// The detail read resolved.
    DetailLoaded {
        /// Slug the read was issued for.
        slug: String,
        /// The record, or the transport failure.
        result: Result<Product, ApiError>,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Edit surface
    // ═══════════════════════════════════════════════════════════════════
    /// Open the editor on `product`, re-seeding if the identity changed.
    EditRequested(Product),
    /// The host changed the edit form's fields.
    EditFormChanged(ProductForm),
    /// Submit the edit form. Validation failures stop here.
    EditSubmitted,
    /// Close the editor, discarding unsaved edits.
    EditClosed,
    /// The update mutation finished.
    UpdateFinished {
        /// Id of the updated record.
        id: i64,
        /// The updated record, or the failure to reconcile.
        result: Result<Product, ApiError>,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Delete confirmation
    // ═══════════════════════════════════════════════════════════════════
    /// Open the confirmation dialog for `product`.
    DeleteRequested(Product),
    /// Confirm the pending delete; issues the mutation.
    DeleteConfirmed,
    /// Dismiss the confirmation dialog.
    DeleteCancelled,
    /// The delete mutation finished.
    DeleteFinished {
        /// Id of the deleted record.
        id: i64,
        /// Ack, or the failure shown on the dialog.
        result: Result<(), ApiError>,
    },
}
