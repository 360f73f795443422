//! State for the products list feature.

use storefront_api::types::DEFAULT_PAGE_SIZE;
use storefront_api::{Category, ListQuery, Product};

use crate::forms::{FormErrors, ProductForm};

/// Load status of a server-backed collection in this state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A read is in flight.
    Loading,
    /// The last read resolved.
    Loaded,
    /// The last read failed; previously loaded data is kept.
    Failed(String),
}

/// Detail selection, driven by slug.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// No record selected.
    #[default]
    None,
    /// A detail read for `slug` is in flight.
    Loading {
        /// The requested record's slug.
        slug: String,
    },
    /// The selected record.
    Loaded(Product),
}

impl Selection {
    /// The selected product, when loaded.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        match self {
            Self::Loaded(product) => Some(product),
            Self::None | Self::Loading { .. } => None,
        }
    }
}

/// The edit-dialog surface. Present while the dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    /// The record being edited, as loaded.
    pub product: Product,
    /// The editable fields, seeded from `product`.
    pub form: ProductForm,
    /// Validation and reconciliation errors.
    pub errors: FormErrors,
    /// True while the update mutation is in flight.
    pub submitting: bool,
}

impl Editor {
    /// Open an editor seeded from `product`.
    #[must_use]
    pub fn seeded(product: Product) -> Self {
        Self {
            form: ProductForm::from_product(&product),
            product,
            errors: FormErrors::default(),
            submitting: false,
        }
    }
}

/// The delete-confirmation surface. Present while the dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteDialog {
    /// The candidate record.
    pub product: Product,
    /// Message shown when the last delete attempt failed.
    pub error: Option<String>,
    /// True while the delete mutation is in flight.
    pub deleting: bool,
}

impl DeleteDialog {
    /// Open a confirmation dialog for `product`.
    #[must_use]
    pub const fn for_product(product: Product) -> Self {
        Self {
            product,
            error: None,
            deleting: false,
        }
    }
}

/// State of the products list: paging, search, loaded data, and the
/// detail/edit/delete surfaces hanging off the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsState {
    /// Current page, 1-based. Mirrored to the `page` URL parameter.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Search text as typed, updated on every keystroke. Mirrored to the
    /// `q` URL parameter.
    pub query: Option<String>,
    /// Search text as last committed by the debounce timer. This value,
    /// not `query`, keys the list read.
    pub debounced_query: Option<String>,
    /// Total matching products server-side. `None` until the first page
    /// resolves; pagination treats `None` as a single page.
    pub total: Option<u64>,
    /// The current page's items.
    pub items: Vec<Product>,
    /// List load status.
    pub status: LoadStatus,
    /// Categories for the edit form's picker.
    pub categories: Vec<Category>,
    /// Category load status.
    pub categories_status: LoadStatus,
    /// Detail selection by slug.
    pub selection: Selection,
    /// Message of the last failed detail read, cleared on the next request.
    pub selection_error: Option<String>,
    /// The edit surface, when open.
    pub editor: Option<Editor>,
    /// The delete-confirmation surface, when open.
    pub delete: Option<DeleteDialog>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            query: None,
            debounced_query: None,
            total: None,
            items: Vec::new(),
            status: LoadStatus::Idle,
            categories: Vec::new(),
            categories_status: LoadStatus::Idle,
            selection: Selection::None,
            selection_error: None,
            editor: None,
            delete: None,
        }
    }
}

impl ProductsState {
    /// Total pages at the current limit. Unknown totals count as one page,
    /// so pagination stays inert until the first load resolves.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total
            .map_or(1, |total| total.div_ceil(u64::from(self.limit)).max(1))
    }

    /// True while typed search text has not yet been committed by the
    /// debounce timer.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.query != self.debounced_query
    }

    /// The list read this state currently calls for. Keyed by the
    /// committed (debounced) search text.
    #[must_use]
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.limit,
            query: self.debounced_query.clone(),
        }
    }
}
