//! Cache keys and error plumbing shared by the catalog features.
//!
//! Keys name the logical resource first and carry the read parameters in
//! canonical form, so mutations can invalidate by resource
//! (`invalidate_resource`) or by exact record (`invalidate`).

use serde::Serialize;
use serde_json::{Value, json};
use storefront_api::{ApiError, ListQuery};
use storefront_query::{QueryError, QueryKey};

/// Resource name for paginated, filterable list reads.
pub const PRODUCTS_RESOURCE: &str = "products";

/// Resource name for single-record reads by slug.
pub const PRODUCT_RESOURCE: &str = "product";

/// Resource name for the category list.
pub const CATEGORIES_RESOURCE: &str = "categories";

/// Cache key for one page of the products list.
#[must_use]
pub fn list_key(request: &ListQuery) -> QueryKey {
    QueryKey::new(
        PRODUCTS_RESOURCE,
        json!({
            "page": request.page,
            "limit": request.limit,
            "query": request.query,
        }),
    )
}

/// Cache key for a product detail read.
#[must_use]
pub fn detail_key(slug: &str) -> QueryKey {
    QueryKey::new(PRODUCT_RESOURCE, json!({ "slug": slug }))
}

/// Cache key for the category list.
#[must_use]
pub fn categories_key() -> QueryKey {
    QueryKey::bare(CATEGORIES_RESOURCE)
}

/// Encode a gateway response for cache storage.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the value does not serialize, which
/// would indicate a non-JSON-representable domain type.
pub fn encode<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Unwrap a cache read error back to the transport error the reducers
/// reconcile on. Cache-side deserialization failures surface as decode
/// errors.
#[must_use]
pub fn as_api_error(error: QueryError) -> ApiError {
    match error {
        QueryError::Fetch(error) => error,
        QueryError::Deserialize(message) => ApiError::Decode(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_requests_share_a_key() {
        let a = ListQuery::page(2).with_query("chair");
        let b = ListQuery::page(2).with_query("chair");
        assert_eq!(list_key(&a), list_key(&b));
        assert_ne!(list_key(&a), list_key(&ListQuery::page(3).with_query("chair")));
    }

    #[test]
    fn test_detail_and_list_keys_are_disjoint_resources() {
        assert_eq!(list_key(&ListQuery::default()).resource(), PRODUCTS_RESOURCE);
        assert_eq!(detail_key("chair").resource(), PRODUCT_RESOURCE);
        assert_eq!(categories_key().resource(), CATEGORIES_RESOURCE);
    }
}
