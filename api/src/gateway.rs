//! The resource gateway: typed domain operations over the transport client.
//!
//! A pure mapping layer - one function per operation, no gateway-level
//! error translation. Failures are logged and re-raised unchanged so the
//! query cache and form layers see the original [`ApiError`].

use std::future::Future;

use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::types::{Category, ListQuery, NewProduct, Product, ProductPage, ProductUpdate};

/// Response header carrying the total result count for list reads.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Product operations.
pub trait ProductGateway: Send + Sync {
    /// List one page of products, optionally filtered by search text.
    ///
    /// Translates the 1-based `page` into a zero-based `offset` for the
    /// wire. The page's `total` comes from the `X-Total-Count` response
    /// header, falling back to the returned item count.
    fn list_products(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<ProductPage, ApiError>> + Send;

    /// Fetch a single product by its slug.
    fn get_product_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Create a product. The server assigns the id and derives the slug.
    fn create_product(
        &self,
        input: &NewProduct,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Replace a product's mutable fields.
    fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Delete a product. Server-authoritative; callers purge cached copies
    /// on success.
    fn delete_product(&self, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Category operations. Read-only.
pub trait CategoryGateway: Send + Sync {
    /// List all categories.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, ApiError>> + Send;
}

/// Gateway implementation over the REST transport client.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: ApiClient,
}

impl RestGateway {
    /// Create a gateway over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ProductGateway for RestGateway {
    #[tracing::instrument(skip(self), fields(page = query.page, limit = query.limit))]
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ApiError> {
        let mut params = vec![
            ("limit".to_string(), query.limit.to_string()),
            ("offset".to_string(), query.offset().to_string()),
        ];
        if let Some(text) = query.query.as_deref().filter(|t| !t.is_empty()) {
            params.push(("query".to_string(), text.to_string()));
        }

        let response = self
            .client
            .send_raw(Method::GET, "/products", RequestOptions::params(params))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "list_products failed"))?;

        let total_header = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let items = response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let total = total_header.unwrap_or(items.len() as u64);

        Ok(ProductPage { items, total })
    }

    #[tracing::instrument(skip(self))]
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        self.client
            .send(
                Method::GET,
                &format!("/products/slug/{slug}"),
                RequestOptions::default(),
            )
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "get_product_by_slug failed"))
    }

    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    async fn create_product(&self, input: &NewProduct) -> Result<Product, ApiError> {
        self.client
            .send(Method::POST, "/products", RequestOptions::json(input)?)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "create_product failed"))
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, ApiError> {
        self.client
            .send(
                Method::PUT,
                &format!("/products/{id}"),
                RequestOptions::json(update)?,
            )
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "update_product failed"))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .send_raw(
                Method::DELETE,
                &format!("/products/{id}"),
                RequestOptions::default(),
            )
            .await
            .map(|_| ())
            .inspect_err(|e| tracing::warn!(error = %e, "delete_product failed"))
    }
}

impl CategoryGateway for RestGateway {
    #[tracing::instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client
            .send(Method::GET, "/categories", RequestOptions::default())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "list_categories failed"))
    }
}
