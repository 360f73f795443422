//! # Storefront Core
//!
//! Core traits and types for the Storefront client architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! data-synchronization and list-state core of a catalog dashboard using the
//! Reducer pattern: explicit state transitions with side effects described as
//! values.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (list paging, form fields, selection)
//! - **Action**: All possible inputs to a reducer (user intents, effect results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution), including cancellable
//!   timers for debounce
//! - **Environment**: Injected dependencies via traits (gateway, query cache)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use storefront_core::*;
//!
//! // Define your state
//! #[derive(Clone, Debug)]
//! struct ProductsState {
//!     page: u32,
//!     query: Option<String>,
//! }
//!
//! // Define your actions
//! #[derive(Clone, Debug)]
//! enum ProductsAction {
//!     NextPage,
//!     QueryEdited(String),
//! }
//!
//! // Implement the reducer
//! impl Reducer for ProductsReducer {
//!     type State = ProductsState;
//!     type Action = ProductsAction;
//!     type Environment = ProductsEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ProductsState,
//!         action: ProductsAction,
//!         env: &ProductsEnvironment,
//!     ) -> SmallVec<[Effect<ProductsAction>; 4]> {
//!         // Feature logic goes here
//!         smallvec![]
//!     }
//! }
//! ```

// Re-export the effect-list type so reducer implementations and tests use
// one consistent signature.
pub use smallvec::{SmallVec, smallvec};

/// Effect descriptions returned by reducers, executed by the runtime
pub mod effect;

/// Macros for building effects inside reducer match arms
pub mod effect_macros;

/// The Reducer trait - core abstraction for feature logic
pub mod reducer;

pub use effect::{Effect, EffectId};
pub use reducer::Reducer;
