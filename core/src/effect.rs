//! Side-effect descriptions returned by reducers
//!
//! Effects are values, not execution: a reducer describes what should happen
//! (a timer, an async computation, a cancellation) and the Store runtime in
//! `storefront-runtime` performs it. Keeping effects as data is what makes
//! reducers pure and directly assertable in tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Identifier scoping cancellable effects
///
/// Long-lived operations that can be superseded (a debounce timer, an
/// in-flight list fetch) register under an id. Starting a cancellable effect
/// aborts any in-flight effect with the same id, and [`Effect::Cancel`]
/// aborts one explicitly (e.g. on view teardown).
///
/// Ids are static strings so features can name their operations without
/// allocation:
///
/// ```
/// use storefront_core::effect::EffectId;
///
/// const SEARCH_DEBOUNCE: EffectId = EffectId::new("products.search.debounce");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(&'static str);

impl EffectId {
    /// Create an effect id from a static name
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The static name backing this id
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Effect type - describes a side effect to be executed
///
/// Effects are NOT executed immediately. They are descriptions of what should
/// happen, returned from reducers and executed by the Store runtime.
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for debounce timers, timeouts)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

    /// An effect that can be aborted by id
    ///
    /// Starting a cancellable effect cancels any in-flight effect registered
    /// under the same id, so at most one effect per id runs at a time. This
    /// is the primitive behind trailing-edge debounce: every keystroke
    /// replaces the pending timer.
    Cancellable {
        /// Identifier under which the runtime tracks the running task
        id: EffectId,
        /// The effect to run under that identifier
        effect: Box<Effect<Action>>,
    },

    /// Abort the in-flight effect registered under `id`, if any
    ///
    /// A no-op when nothing is registered. Used on teardown so no stale
    /// timer or fetch fires after a view goes away.
    Cancel(EffectId),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => {
                f.debug_tuple("Effect::Parallel").field(effects).finish()
            },
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            Effect::Cancellable { id, effect } => f
                .debug_struct("Effect::Cancellable")
                .field("id", id)
                .field("effect", effect)
                .finish(),
            Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run in parallel
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }

    /// Wrap an effect so it can be aborted (and replaced) by id
    #[must_use]
    pub fn cancellable(id: EffectId, effect: Effect<Action>) -> Effect<Action> {
        Effect::Cancellable {
            id,
            effect: Box::new(effect),
        }
    }

    /// Dispatch `action` after `duration` of quiet, cancelling any pending
    /// timer with the same id
    ///
    /// Trailing-edge debounce: issuing this effect again before the delay
    /// elapses replaces the timer, so only the last value in a burst ever
    /// produces the action.
    #[must_use]
    pub fn debounce(id: EffectId, duration: Duration, action: Action) -> Effect<Action> {
        Effect::Cancellable {
            id,
            effect: Box::new(Effect::Delay {
                duration,
                action: Box::new(action),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)] // Test assertions can panic
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        TimerFired,
    }

    const TIMER: EffectId = EffectId::new("test.timer");

    #[test]
    fn test_effect_id_name_round_trip() {
        assert_eq!(TIMER.name(), "test.timer");
        assert_eq!(TIMER.to_string(), "test.timer");
        assert_eq!(TIMER, EffectId::new("test.timer"));
    }

    #[test]
    fn test_debounce_wraps_delay_in_cancellable() {
        let effect = Effect::debounce(TIMER, Duration::from_millis(300), TestAction::TimerFired);

        match effect {
            Effect::Cancellable { id, effect } => {
                assert_eq!(id, TIMER);
                match *effect {
                    Effect::Delay { duration, action } => {
                        assert_eq!(duration, Duration::from_millis(300));
                        assert_eq!(*action, TestAction::TimerFired);
                    },
                    other => panic!("expected Effect::Delay, got {other:?}"),
                }
            },
            other => panic!("expected Effect::Cancellable, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_and_chain_preserve_order() {
        let merged = Effect::<TestAction>::merge(vec![Effect::None, Effect::Cancel(TIMER)]);
        assert!(matches!(&merged, Effect::Parallel(effects) if effects.len() == 2));

        let chained = Effect::<TestAction>::chain(vec![Effect::Cancel(TIMER), Effect::None]);
        assert!(matches!(&chained, Effect::Sequential(effects) if effects.len() == 2));
    }

    #[test]
    fn test_debug_formatting_is_stable() {
        let effect = Effect::<TestAction>::Cancel(TIMER);
        assert_eq!(
            format!("{effect:?}"),
            "Effect::Cancel(EffectId(\"test.timer\"))"
        );
    }
}
