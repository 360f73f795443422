//! URL round-trip for the products list.
//!
//! The `page` and `q` query parameters are the source of truth for list
//! state across navigation: mounting parses them, and every page or
//! search commit is mirrored back by the host. Only non-default values
//! are written, so the default view keeps a clean URL.

use serde::{Deserialize, Serialize};

use crate::products::state::ProductsState;

#[derive(Debug, Default, Serialize, Deserialize)]
struct UrlParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

impl ProductsState {
    /// Seed list state from a URL query string (without the leading `?`).
    ///
    /// Missing or malformed parameters fall back to the defaults: page 1,
    /// no search. The parsed search text seeds both `query` and
    /// `debounced_query`, so arriving via URL does not count as an
    /// uncommitted search.
    #[must_use]
    pub fn from_url(query_string: &str) -> Self {
        let params: UrlParams = serde_urlencoded::from_str(query_string).unwrap_or_default();
        let query = params.q.filter(|q| !q.is_empty());
        Self {
            page: params.page.unwrap_or(1).max(1),
            query: query.clone(),
            debounced_query: query,
            ..Self::default()
        }
    }

    /// Encode the navigable parts of this state as a URL query string.
    #[must_use]
    pub fn to_url_query(&self) -> String {
        let params = UrlParams {
            page: (self.page > 1).then_some(self.page),
            q: self.query.clone().filter(|q| !q.is_empty()),
        };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }
}
