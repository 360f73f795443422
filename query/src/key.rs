//! Cache keys: logical resource name plus canonical parameters.

use serde_json::Value;

/// A value uniquely identifying one cached read by operation + parameters.
///
/// Parameters are canonicalized through `serde_json::Value`, whose object
/// representation is sorted by field name, so two semantically equal
/// parameter objects produce byte-identical keys regardless of field
/// insertion order.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use storefront_query::QueryKey;
///
/// let a = QueryKey::new("products", json!({ "page": 1, "limit": 6 }));
/// let b = QueryKey::new("products", json!({ "limit": 6, "page": 1 }));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: String,
}

impl QueryKey {
    /// Create a key for `resource` with `params`.
    #[must_use]
    pub fn new(resource: impl Into<String>, params: Value) -> Self {
        Self {
            resource: resource.into(),
            params: params.to_string(),
        }
    }

    /// Create a key for a parameterless read of `resource`.
    #[must_use]
    pub fn bare(resource: impl Into<String>) -> Self {
        Self::new(resource, Value::Null)
    }

    /// The logical resource name (`products`, `product`, `categories`).
    ///
    /// Invalidation after a mutation matches entries by this name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The canonical parameter serialization.
    #[must_use]
    pub fn params_json(&self) -> &str {
        &self.params
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}?{}", self.resource, self.params)
    }
}
