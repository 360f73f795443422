//! Domain types mirroring the catalog API wire format.
//!
//! Field names are `camelCase` on the wire. `Product` embeds a full
//! `Category` snapshot rather than a reference, so a product's category
//! display can go stale relative to the category's live record until the
//! product itself is refetched - that is the server's data model, mirrored
//! here as-is.

use serde::{Deserialize, Serialize};

/// Placeholder image substituted when a product carries no images.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400";

/// Default page size for the products list.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// A product category. Read-only from this system's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL-safe unique slug, server-derived.
    pub slug: String,
    /// Category image URL.
    pub image: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identity, immutable across updates.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// URL-safe unique slug, server-derived from the title.
    pub slug: String,
    /// Unit price.
    pub price: f64,
    /// Description. May be empty in storage; the forms require it.
    #[serde(default)]
    pub description: String,
    /// Embedded category snapshot.
    pub category: Category,
    /// Ordered image URLs, possibly empty.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// The display thumbnail: first image, or the placeholder when the
    /// product has none.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        self.images
            .first()
            .map_or(PLACEHOLDER_IMAGE, String::as_str)
    }
}

/// Payload for creating a product.
///
/// The server assigns `id` and derives `slug`. `images` defaults to the
/// single placeholder URL - image upload is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Description.
    pub description: String,
    /// Category reference by id.
    pub category_id: i64,
    /// Image URLs.
    pub images: Vec<String>,
}

/// Payload for updating a product. The id travels in the path and is
/// immutable; every other field is replaceable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Description.
    pub description: String,
    /// Category reference by id.
    pub category_id: i64,
    /// Image URLs.
    pub images: Vec<String>,
}

/// Parameters for a paginated, filterable product list read.
///
/// `page` is 1-based; the wire wants a zero-based `offset`, translated by
/// [`ListQuery::offset`]. Lives in navigable URL state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Optional search text.
    pub query: Option<String>,
}

impl ListQuery {
    /// Create a query for `page` with the default page size.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self {
            page,
            limit: DEFAULT_PAGE_SIZE,
            query: None,
        }
    }

    /// Attach search text.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Zero-based offset for the wire. Saturates rather than overflowing;
    /// page numbers are not clamped upstream.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::page(1)
    }
}

/// One page of products plus the server-side total across all pages.
///
/// The body of `GET /products` is a bare array; `total` is sourced from
/// the `X-Total-Count` response header, falling back to the returned item
/// count when the header is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// The items on this page.
    pub items: Vec<Product>,
    /// Total matching products across all pages.
    pub total: u64,
}
