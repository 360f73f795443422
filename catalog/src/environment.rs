//! Injected dependencies for the catalog features.

use std::sync::Arc;

use storefront_query::QueryClient;

/// Dependencies the catalog reducers need: the resource gateway and the
/// shared query cache.
///
/// Generic over the gateway so tests inject `MockGateway` and production
/// wires `RestGateway`. Both fields are `Arc`s; cloning the environment is
/// cheap and every clone shares one cache.
pub struct CatalogEnvironment<G> {
    /// Resource gateway for product and category operations.
    pub gateway: Arc<G>,
    /// Shared server-state cache. All features fetch reads through it and
    /// invalidate it after mutations.
    pub queries: Arc<QueryClient>,
}

impl<G> CatalogEnvironment<G> {
    /// Create an environment over `gateway` with a fresh cache.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Arc::new(gateway),
            queries: Arc::new(QueryClient::new()),
        }
    }

    /// Create an environment sharing an existing cache.
    #[must_use]
    pub fn with_queries(gateway: G, queries: Arc<QueryClient>) -> Self {
        Self {
            gateway: Arc::new(gateway),
            queries,
        }
    }
}

// Manual impl: `G` itself need not be Clone behind the Arc.
impl<G> Clone for CatalogEnvironment<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            queries: Arc::clone(&self.queries),
        }
    }
}

impl<G> std::fmt::Debug for CatalogEnvironment<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEnvironment")
            .field("queries", &self.queries)
            .finish_non_exhaustive()
    }
}
