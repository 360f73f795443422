//! # Storefront Testing
//!
//! Testing utilities and helpers for the Storefront client architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: a fluent Given-When-Then harness for pure reducer tests
//! - Assertion helpers for the effect vocabulary (futures, delays,
//!   cancellables, cancels)
//!
//! ## Example
//!
//! ```ignore
//! use storefront_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(ProductsReducer::new())
//!     .with_env(test_environment())
//!     .given_state(ProductsState::default())
//!     .when_action(ProductsAction::NextPage)
//!     .then_state(|state| {
//!         assert_eq!(state.page, 2);
//!     })
//!     .then_effects(|effects| {
//!         assertions::assert_has_future_effect(effects);
//!     })
//!     .run();
//! ```


// Re-export commonly used items
pub use reducer_test::{ReducerTest, assertions};
