//! # Storefront Catalog
//!
//! The catalog features of the Storefront dashboard, as reducers over
//! `storefront-core`:
//!
//! - [`products`]: the paginated, searchable product list, with the
//!   detail selection and the edit/delete surfaces. Debounced search
//!   (300 ms trailing edge), URL-mirrored `page`/`q` state, reads keyed
//!   through the shared query cache.
//! - [`creator`]: the create-product form. Validation gates the network;
//!   server rejections reconcile back onto the form; success raises a
//!   navigation marker for the host.
//! - [`forms`]: the shared form schema ([`ProductForm`]), validation via
//!   `validator`, and server-rejection reconciliation ([`FormErrors`]).
//!
//! Both features run in a `storefront-runtime` store with a
//! [`CatalogEnvironment`] injecting the gateway and the shared
//! [`QueryClient`](storefront_query::QueryClient). [`mocks::MockGateway`]
//! is the in-memory stand-in tests drive.

pub mod creator;
pub mod environment;
pub mod error;
pub mod forms;
pub mod keys;
pub mod mocks;
pub mod products;
mod url;

pub use creator::{CreatorAction, CreatorReducer, CreatorState};
pub use environment::CatalogEnvironment;
pub use error::CatalogError;
pub use forms::{FormErrors, ProductForm, SubmitIntent};
pub use products::{
    LoadStatus, ProductsAction, ProductsReducer, ProductsState, Selection,
};
