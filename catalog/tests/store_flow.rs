//! Store-level flows for the catalog features.
//!
//! These tests run the real runtime with a paused clock: debounce timers,
//! cancellation on teardown, and cache invalidation are asserted against
//! the calls that actually reach the recording gateway.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;

use storefront_api::{Category, ListQuery, Product};
use storefront_catalog::creator::{CreatorAction, CreatorReducer, CreatorState};
use storefront_catalog::mocks::MockGateway;
use storefront_catalog::products::{ProductsAction, ProductsReducer, ProductsState};
use storefront_catalog::{CatalogEnvironment, LoadStatus, ProductForm};
use storefront_query::QueryClient;
use storefront_runtime::Store;

// ============================================================================
// Fixtures
// ============================================================================

fn category() -> Category {
    Category {
        id: 1,
        name: "Furniture".to_string(),
        slug: "furniture".to_string(),
        image: String::new(),
    }
}

fn product(id: i64, title: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        price: 49.0,
        description: format!("{title} description"),
        category: category(),
        images: vec![],
    }
}

fn seeded_catalog(count: i64) -> Vec<Product> {
    (1..=count)
        .map(|id| product(id, &format!("Chair {id}")))
        .collect()
}

type ProductsStore = Store<
    ProductsState,
    ProductsAction,
    CatalogEnvironment<MockGateway>,
    ProductsReducer<MockGateway>,
>;

/// A products store plus a handle on its recording gateway and shared cache.
fn products_store(gateway: MockGateway) -> (ProductsStore, Arc<MockGateway>, Arc<QueryClient>) {
    let gateway = Arc::new(gateway);
    let queries = Arc::new(QueryClient::new());
    let env = CatalogEnvironment {
        gateway: Arc::clone(&gateway),
        queries: Arc::clone(&queries),
    };
    let store = Store::new(ProductsState::default(), ProductsReducer::new(), env);
    (store, gateway, queries)
}

/// With a paused clock, sleeping auto-advances time once every task is
/// idle, so this drains timers and effect feedback deterministically.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(2)).await;
}

// ============================================================================
// Debounced search through the runtime
// ============================================================================

/// A typing burst replaces the pending timer on every keystroke; only the
/// final value of the burst reaches the network, once.
#[tokio::test(start_paused = true)]
async fn test_search_burst_reaches_the_network_once() {
    let (store, gateway, _) = products_store(MockGateway::new().with_products(seeded_catalog(3)));

    for text in ["c", "ch", "cha"] {
        let _ = store
            .send(ProductsAction::QueryEdited(text.to_string()))
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    settle().await;

    let calls = gateway.list_calls();
    assert_eq!(
        calls,
        vec![ListQuery {
            page: 1,
            limit: 6,
            query: Some("cha".to_string()),
        }],
        "only the settled query may fetch"
    );

    let (committed, status) = store
        .state(|s| (s.debounced_query.clone(), s.status.clone()))
        .await;
    assert_eq!(committed.as_deref(), Some("cha"));
    assert_eq!(status, LoadStatus::Loaded);
}

/// Tearing the view down before the quiet period elapses cancels the
/// timer: nothing fires afterwards.
#[tokio::test(start_paused = true)]
async fn test_closed_cancels_the_pending_search_timer() {
    let (store, gateway, _) = products_store(MockGateway::new().with_products(seeded_catalog(3)));

    let _ = store
        .send(ProductsAction::QueryEdited("lamp".to_string()))
        .await;
    let _ = store.send(ProductsAction::Closed).await;
    settle().await;

    assert!(
        gateway.list_calls().is_empty(),
        "cancelled timer must not commit a search"
    );
}

// ============================================================================
// Cache behavior across the full loop
// ============================================================================

/// Reopening the list replays the cached page without touching the
/// gateway again.
#[tokio::test(start_paused = true)]
async fn test_reopening_serves_the_cached_page() {
    let (store, gateway, _) = products_store(MockGateway::new().with_products(seeded_catalog(8)));

    let _ = store.send(ProductsAction::Opened).await;
    settle().await;
    let _ = store.send(ProductsAction::Closed).await;
    let _ = store.send(ProductsAction::Opened).await;
    settle().await;

    assert_eq!(gateway.list_calls().len(), 1, "second open is a cache hit");
    let (items, total) = store.state(|s| (s.items.len(), s.total)).await;
    assert_eq!(items, 6);
    assert_eq!(total, Some(8));
}

/// A confirmed delete invalidates the products resource, so the list
/// refetch that follows goes back to the network and reflects the removal.
#[tokio::test(start_paused = true)]
async fn test_confirmed_delete_invalidates_and_refetches() {
    let (store, gateway, _) = products_store(MockGateway::new().with_products(seeded_catalog(8)));

    let _ = store.send(ProductsAction::Opened).await;
    settle().await;
    assert_eq!(store.state(|s| s.items.len()).await, 6);

    let _ = store
        .send(ProductsAction::DeleteRequested(product(1, "Chair 1")))
        .await;
    let _ = store.send(ProductsAction::DeleteConfirmed).await;
    settle().await;

    assert_eq!(gateway.delete_calls(), vec![1]);
    assert_eq!(
        gateway.list_calls().len(),
        2,
        "the post-delete read must bypass the now-stale cache entry"
    );

    let (ids, total, dialog_open, status) = store
        .state(|s| {
            (
                s.items.iter().map(|p| p.id).collect::<Vec<_>>(),
                s.total,
                s.delete.is_some(),
                s.status.clone(),
            )
        })
        .await;
    assert!(!ids.contains(&1), "deleted record is gone from the page");
    assert_eq!(ids.len(), 6, "page refills from the remaining records");
    assert_eq!(total, Some(7));
    assert!(!dialog_open);
    assert_eq!(status, LoadStatus::Loaded);
}

/// Creating a product in one store invalidates the list another store
/// reads through the same cache.
#[tokio::test(start_paused = true)]
async fn test_create_invalidates_the_list_across_stores() {
    let gateway = Arc::new(MockGateway::new().with_categories(vec![category()]));
    let queries = Arc::new(QueryClient::new());

    let products = Store::new(
        ProductsState::default(),
        ProductsReducer::new(),
        CatalogEnvironment {
            gateway: Arc::clone(&gateway),
            queries: Arc::clone(&queries),
        },
    );
    let creator = Store::new(
        CreatorState::default(),
        CreatorReducer::new(),
        CatalogEnvironment {
            gateway: Arc::clone(&gateway),
            queries: Arc::clone(&queries),
        },
    );

    let _ = products.send(ProductsAction::Opened).await;
    settle().await;
    assert_eq!(gateway.list_calls().len(), 1);
    assert_eq!(products.state(|s| s.items.len()).await, 0);

    let _ = creator
        .send(CreatorAction::FormChanged(ProductForm {
            title: "Desk".to_string(),
            price: 120.0,
            description: "A standing desk".to_string(),
            category_id: "1".to_string(),
        }))
        .await;
    let _ = creator.send(CreatorAction::Submitted).await;
    settle().await;

    assert_eq!(gateway.create_calls().len(), 1);
    assert!(creator.state(|s| s.completed).await);

    let _ = products.send(ProductsAction::Opened).await;
    settle().await;

    assert_eq!(
        gateway.list_calls().len(),
        2,
        "the create must have marked the shared list entry stale"
    );
    let titles = products
        .state(|s| s.items.iter().map(|p| p.title.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(titles, vec!["Desk".to_string()]);
}
