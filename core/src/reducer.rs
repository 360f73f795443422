//! The core trait for feature logic
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They contain all feature logic and are deterministic and testable.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait - core abstraction for feature logic
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for ProductsReducer {
///     type State = ProductsState;
///     type Action = ProductsAction;
///     type Environment = CatalogEnvironment<G>;
///
///     fn reduce(
///         &self,
///         state: &mut ProductsState,
///         action: ProductsAction,
///         env: &CatalogEnvironment<G>,
///     ) -> SmallVec<[Effect<ProductsAction>; 4]> {
///         match action {
///             ProductsAction::NextPage => {
///                 // State transition plus effect descriptions here
///                 smallvec![]
///             }
///             _ => smallvec![],
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// This is a pure function that:
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed
    ///
    /// # Arguments
    ///
    /// - `state`: Mutable reference to current state
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// The effects to be executed by the runtime. Most transitions produce
    /// zero or one effect; the inline capacity avoids allocation for those.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
