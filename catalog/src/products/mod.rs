//! The products list feature: pagination, debounced search, detail
//! selection, and the edit/delete surfaces.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::ProductsAction;
pub use reducer::{
    CATEGORIES_FETCH, DETAIL_FETCH, LIST_FETCH, ProductsReducer, SEARCH_DEBOUNCE,
    SEARCH_DEBOUNCE_DELAY,
};
pub use state::{DeleteDialog, Editor, LoadStatus, ProductsState, Selection};
