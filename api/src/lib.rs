//! # Storefront API
//!
//! HTTP transport client and resource gateway for the Storefront catalog API.
//!
//! This crate owns everything between the feature reducers and the wire:
//!
//! - **Transport Client** ([`ApiClient`]): one configured HTTP client with
//!   base URL, bearer-credential attachment, and a global 401 handler that
//!   clears the credential and notifies the login boundary
//! - **Resource Gateway** ([`ProductGateway`], [`CategoryGateway`]): typed
//!   functions mapping domain operations onto transport calls
//! - **Domain types** ([`Product`], [`Category`], [`NewProduct`], ...)
//!
//! ## Layering
//!
//! ```text
//! reducers → gateway traits → ApiClient → reqwest
//! ```
//!
//! The gateway re-raises transport failures unchanged (after logging); retry
//! policy, if any, belongs to callers - none is implemented here.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use credentials::{CredentialStore, InMemoryCredentialStore, UnauthorizedObserver};
pub use error::ApiError;
pub use gateway::{CategoryGateway, ProductGateway, RestGateway};
pub use types::{Category, ListQuery, NewProduct, Product, ProductPage, ProductUpdate};
