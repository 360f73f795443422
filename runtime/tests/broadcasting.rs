//! Integration tests for Store action broadcasting
//!
//! Tests the action observation features that let a host UI react to
//! effect-produced events (list loaded, mutation finished) without
//! coupling to the rendering layer.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;

use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use storefront_runtime::Store;

// ============================================================================
// Test Fixtures
// ============================================================================

/// A miniature list feature: a page request resolves asynchronously into a
/// loaded event, mimicking the gateway round-trip without any network.
#[derive(Debug, Clone, PartialEq)]
enum ListAction {
    /// Request a page of items
    PageRequested { page: u32 },
    /// The page resolved (terminal event)
    PageLoaded { page: u32, items: Vec<String> },
    /// The page failed (terminal event)
    PageFailed { page: u32, error: String },
}

#[derive(Debug, Clone, Default)]
struct ListState {
    page: u32,
    items: Vec<String>,
    error: Option<String>,
}

#[derive(Clone)]
struct ListEnvironment {
    /// Pages at or above this index fail, everything below succeeds
    fail_from_page: u32,
}

#[derive(Clone)]
struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::PageRequested { page } => {
                state.page = page;
                let fail_from = env.fail_from_page;
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    if page >= fail_from {
                        Some(ListAction::PageFailed {
                            page,
                            error: "boom".to_string(),
                        })
                    } else {
                        Some(ListAction::PageLoaded {
                            page,
                            items: vec![format!("item-{page}-a"), format!("item-{page}-b")],
                        })
                    }
                }))]
            }

            ListAction::PageLoaded { items, .. } => {
                state.items = items;
                state.error = None;
                smallvec![Effect::None]
            }

            ListAction::PageFailed { error, .. } => {
                state.error = Some(error);
                smallvec![Effect::None]
            }
        }
    }
}

fn store(fail_from_page: u32) -> Store<ListState, ListAction, ListEnvironment, ListReducer> {
    Store::new(
        ListState::default(),
        ListReducer,
        ListEnvironment { fail_from_page },
    )
}

// ============================================================================
// Tests
// ============================================================================

/// `send_and_wait_for` resolves on the success event produced by the effect.
#[tokio::test]
async fn test_send_and_wait_for_page_load() {
    let store = store(u32::MAX);

    let result = store
        .send_and_wait_for(
            ListAction::PageRequested { page: 2 },
            |action| matches!(action, ListAction::PageLoaded { .. } | ListAction::PageFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        ListAction::PageLoaded {
            page: 2,
            items: vec!["item-2-a".to_string(), "item-2-b".to_string()],
        }
    );
}

/// Failure events are broadcast the same way success events are; the
/// caller branches on the terminal action rather than catching anything.
#[tokio::test]
async fn test_send_and_wait_for_page_failure() {
    let store = store(1);

    let result = store
        .send_and_wait_for(
            ListAction::PageRequested { page: 3 },
            |action| matches!(action, ListAction::PageLoaded { .. } | ListAction::PageFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert!(matches!(result, ListAction::PageFailed { page: 3, .. }));

    let error = store.state(|s| s.error.clone()).await;
    assert_eq!(error, Some("boom".to_string()));
}

/// Multiple subscribers each observe every effect-produced action.
#[tokio::test]
async fn test_multiple_observers_see_all_events() {
    let store = store(u32::MAX);

    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    let _ = store.send(ListAction::PageRequested { page: 1 }).await;

    for rx in [&mut first, &mut second] {
        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(action, ListAction::PageLoaded { page: 1, .. }));
    }
}

/// Initial actions sent via `send` are not broadcast - only the actions
/// that effects produce.
#[tokio::test]
async fn test_initial_actions_are_not_broadcast() {
    let store = store(u32::MAX);
    let mut rx = store.subscribe_actions();

    let _ = store.send(ListAction::PageRequested { page: 5 }).await;

    let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(
        matches!(first, ListAction::PageLoaded { .. }),
        "first observed action should be the effect output, got {first:?}"
    );
}

/// A timeout waiting for a terminal action surfaces as `StoreError::Timeout`.
#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = store(u32::MAX);

    let result = store
        .send_and_wait_for(
            ListAction::PageRequested { page: 1 },
            |_| false, // never matches
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(
        result,
        Err(storefront_runtime::error::StoreError::Timeout)
    ));
}

/// State reflects the latest resolution after several page flips.
#[tokio::test]
async fn test_sequential_page_flips() {
    let store = store(u32::MAX);

    for page in 1..=3 {
        let _ = store
            .send_and_wait_for(
                ListAction::PageRequested { page },
                |action| matches!(action, ListAction::PageLoaded { .. }),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
    }

    // Terminal events feed back into the reducer as well; wait for the
    // last one to land in state
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (page, items) = store.state(|s| (s.page, s.items.clone())).await;
    assert_eq!(page, 3);
    assert_eq!(items, vec!["item-3-a".to_string(), "item-3-b".to_string()]);
}
