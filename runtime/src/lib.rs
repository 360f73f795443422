//! # Storefront Runtime
//!
//! Runtime implementation for the Storefront client architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Cancellation Registry**: Tracks in-flight cancellable effects by [`EffectId`],
//!   so a debounce timer or a superseded fetch can be aborted or replaced
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//! use storefront_core::Reducer;
//!
//! let store = Store::new(
//!     initial_state,
//!     my_reducer,
//!     environment,
//! );
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;

use crate::error::StoreError;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// An effect execution failed
        ///
        /// This error is logged but does not halt the store.
        /// Effects are fire-and-forget operations.
        #[error("Effect execution failed: {0}")]
        EffectFailed(String),

        /// A task join error occurred during parallel effect execution
        ///
        /// This typically means a spawned task panicked.
        #[error("Task failed during parallel execution: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),

        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

/// Effect tracking mode - controls how effects are tracked for completion
///
/// # Modes
///
/// - **Direct**: Tracks only immediate effects (default)
/// - **Cascading**: Tracks effects transitively, following the entire effect tree
#[derive(Debug, Clone)]
pub enum TrackingMode {
    /// Track only immediate effects spawned by this action
    Direct,

    /// Track effects transitively - any effects produced by feedback actions
    /// are also tracked as children
    Cascading {
        /// Child effect handles that need to complete before this handle is done
        children: Arc<Mutex<Vec<EffectHandle>>>,
    },
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for effects to complete.
/// Each action gets a handle that can be awaited to know when its effects
/// are done - useful in tests and request-response flows.
///
/// # Example
///
/// ```ignore
/// let handle = store.send(Action::Start).await;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All effects from Action::Start are now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    mode: TrackingMode,
    effects: Arc<AtomicUsize>,
    completion: tokio::sync::watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle with the given tracking mode
    ///
    /// Returns the handle (for the caller to wait on) and the internal
    /// tracking context threaded through effect execution.
    fn new<A>(mode: TrackingMode) -> (Self, EffectTracking<A>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = tokio::sync::watch::channel(());

        let handle = Self {
            mode: mode.clone(),
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            mode,
            counter,
            notifier: tx,
            _marker: std::marker::PhantomData,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = tokio::sync::watch::channel(());
        let _ = tx.send(());

        Self {
            mode: TrackingMode::Direct,
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Blocks until the effect counter reaches zero.
    ///
    /// # Panics
    ///
    /// Panics if the mutex protecting cascading children is poisoned.
    /// This should only happen if a thread panicked while holding the lock.
    pub async fn wait(&mut self) {
        // Wait for counter to reach zero
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }

        // If cascading, recursively wait for all children
        if let TrackingMode::Cascading { children } = &self.mode {
            loop {
                let handles = {
                    let mut guard = children
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    if guard.is_empty() {
                        break;
                    }
                    guard.drain(..).collect::<Vec<_>>()
                };

                for mut handle in handles {
                    Box::pin(handle.wait()).await;
                }
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("mode", &self.mode)
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
///
/// This type is internal to the runtime and not exposed to users.
/// It carries the tracking state through effect execution.
struct EffectTracking<A> {
    mode: TrackingMode,
    counter: Arc<AtomicUsize>,
    notifier: tokio::sync::watch::Sender<()>,
    _marker: std::marker::PhantomData<fn() -> A>,
}

impl<A> EffectTracking<A> {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

impl<A> Clone for EffectTracking<A> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode.clone(),
            counter: Arc::clone(&self.counter),
            notifier: self.notifier.clone(),
            _marker: std::marker::PhantomData,
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect
/// panics or the task is aborted mid-flight.
struct DecrementGuard<A>(EffectTracking<A>);

impl<A> Drop for DecrementGuard<A> {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Internal: a cancellable effect currently in flight
struct RegisteredEffect {
    epoch: u64,
    abort: AbortHandle,
}

/// Registry of in-flight cancellable effects, keyed by [`EffectId`]
///
/// Starting a cancellable effect under an id already in flight aborts the
/// previous task (replace-on-start), so at most one task per id runs at a
/// time. Epochs guard removal: a finished task only deregisters itself if
/// it is still the current occupant of its id.
struct CancellationRegistry {
    epoch: AtomicU64,
    entries: Mutex<HashMap<EffectId, RegisteredEffect>>,
}

impl CancellationRegistry {
    fn new() -> Self {
        Self {
            epoch: AtomicU64::new(0),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst)
    }

    /// Register a task under `id`, aborting any previous occupant
    fn register(&self, id: EffectId, epoch: u64, abort: AbortHandle) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(previous) = entries.insert(id, RegisteredEffect { epoch, abort }) {
            tracing::trace!(effect_id = %id, "Replacing in-flight cancellable effect");
            metrics::counter!("store.effects.replaced").increment(1);
            previous.abort.abort();
        }
    }

    /// Abort and deregister the task under `id`, if any
    fn cancel(&self, id: EffectId) {
        let entry = {
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            entries.remove(&id)
        };

        if let Some(entry) = entry {
            tracing::trace!(effect_id = %id, "Cancelling in-flight effect");
            metrics::counter!("store.effects.cancelled").increment(1);
            entry.abort.abort();
        }
    }

    /// Deregister `id` only if `epoch` still owns it
    ///
    /// Called by a task on normal completion. If a newer task has replaced
    /// this one in the meantime, the entry belongs to the newer task and is
    /// left alone.
    fn remove_if_current(&self, id: EffectId, epoch: u64) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if entries.get(&id).is_some_and(|entry| entry.epoch == epoch) {
            entries.remove(&id);
        }
    }

    /// Abort everything still in flight (shutdown path)
    fn abort_all(&self) {
        let entries = {
            let mut guard = self
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            guard.drain().collect::<Vec<_>>()
        };

        for (id, entry) in entries {
            tracing::debug!(effect_id = %id, "Aborting cancellable effect during shutdown");
            entry.abort.abort();
        }
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        AtomicBool, AtomicCounterGuard, AtomicUsize, CancellationRegistry, DecrementGuard,
        Duration, Effect, EffectHandle, EffectTracking, Future, Ordering, Pin, Reducer, RwLock,
        StoreError, TrackingMode,
    };
    use std::sync::Arc;
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (feature logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation registry)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     ProductsState::default(),
    ///     ProductsReducer::new(),
    ///     catalog_environment(),
    /// );
    ///
    /// store.send(ProductsAction::QueryEdited {
    ///     value: "chair".to_string(),
    /// }).await;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        cancellations: Arc<CancellationRegistry>,
        /// Action broadcast channel for observing actions produced by effects.
        ///
        /// All actions produced by effects (e.g., from `Effect::Future`) are
        /// broadcast to observers. This is the seam a host UI subscribes to.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Default action broadcast capacity is 16; increase with
        /// [`Store::with_broadcast_capacity`] when observers lag.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new Store with custom action broadcast capacity
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (feature logic)
        /// - `environment`: Injected dependencies
        /// - `capacity`: Action broadcast channel capacity (number of actions buffered)
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                cancellations: Arc::new(CancellationRegistry::new()),
                action_broadcast,
            }
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Aborts in-flight cancellable effects (pending debounce timers
        ///    must not fire after teardown)
        /// 3. Waits for remaining effects to complete (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before
        /// all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            // Set shutdown flag to reject new actions
            self.shutdown.store(true, Ordering::Release);

            // Pending timers and fetches are abandoned, not awaited
            self.cancellations.abort_all();

            // Wait for pending effects with timeout
            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(100);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running",
                        pending
                    );
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Executes returned effects asynchronously
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// # Concurrency and Effect Execution
        ///
        /// - The reducer executes synchronously while holding a write lock
        /// - Effects execute asynchronously in spawned tasks
        /// - `send()` returns after starting effect execution, not completion
        /// - Multiple concurrent `send()` calls serialize at the reducer level
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let handle = store.send(ProductsAction::NextPage).await?;
        /// handle.wait().await;
        /// ```
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            self.send_internal(action, TrackingMode::Direct).await
        }

        /// Send an action and wait for a matching result action
        ///
        /// Designed for request-response flows: subscribe to the action
        /// broadcast, send the initial action, then wait for an action
        /// matching the predicate.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        ///
        /// # Example
        ///
        /// ```ignore
        /// let result = store.send_and_wait_for(
        ///     ProductsAction::DeleteConfirmed,
        ///     |a| matches!(a,
        ///         ProductsAction::DeleteSucceeded { .. } |
        ///         ProductsAction::DeleteFailed { .. }
        ///     ),
        ///     Duration::from_secs(10),
        /// ).await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            // Subscribe BEFORE sending to avoid race condition
            let mut rx = self.action_broadcast.subscribe();

            // Send the initial action
            self.send(action).await?;

            // Wait for matching action with timeout
            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {} // Not the action we want, keep waiting
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Slow consumer; if the terminal action was among
                            // the dropped ones the timeout catches it
                            tracing::warn!(skipped, "Action observer lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        }
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// The host UI uses this to react to events (list loaded, mutation
        /// finished) without polling state.
        ///
        /// Only actions produced by effects are broadcast, not the initial
        /// actions sent via `send`. A lagging receiver skips old actions.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Internal send implementation with tracking control
        #[tracing::instrument(skip(self, action, tracking_mode), name = "store_send_internal")]
        async fn send_internal(
            &self,
            action: A,
            tracking_mode: TrackingMode,
        ) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            // Check if store is shutting down
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            // Create tracking for this action
            let (handle, tracking) = EffectHandle::new::<A>(tracking_mode);

            let effects = {
                let mut state = self.state.write().await;

                // Metrics: Time reducer execution
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                let duration = start.elapsed();
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(duration.as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            // Execute effects with tracking
            for effect in effects {
                self.execute_effect_internal(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let page = store.state(|s| s.page).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Execute an effect with tracking
        ///
        /// Internal method that executes effects with completion tracking.
        /// Uses [`DecrementGuard`] to ensure the effect counter is always
        /// decremented, even if the effect panics or is aborted.
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Future`: Executes async computation, sends resulting action if `Some`
        /// - `Delay`: Waits for duration, then sends action
        /// - `Parallel`: Executes effects concurrently
        /// - `Sequential`: Executes effects in order, waiting for each to complete
        /// - `Cancellable`: Runs the wrapped effect under an id, aborting any
        ///   in-flight effect with the same id
        /// - `Cancel`: Aborts the in-flight effect registered under an id
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned, pass by value is intentional
        #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
        fn execute_effect_internal(&self, effect: Effect<A>, tracking: EffectTracking<A>)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                }
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    // Each branch spawns independently with shared tracking
                    for effect in effects {
                        self.execute_effect_internal(effect, tracking.clone());
                    }
                }
                Effect::Cancel(id) => {
                    metrics::counter!("store.effects.executed", "type" => "cancel").increment(1);
                    self.cancellations.cancel(id);
                }
                Effect::Cancellable { id, effect } => {
                    metrics::counter!("store.effects.executed", "type" => "cancellable")
                        .increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();
                    let epoch = self.cancellations.next_epoch();

                    let task = tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone.clone());
                        let _pending_guard = pending_guard; // Decrement on drop

                        Self::run_inline(store.clone(), *effect, tracking_clone).await;
                        store.cancellations.remove_if_current(id, epoch);
                    });

                    // Registration aborts the previous occupant of this id,
                    // which is what makes trailing-edge debounce hold
                    self.cancellations.register(id, epoch, task.abort_handle());
                }
                other @ (Effect::Future(_) | Effect::Delay { .. } | Effect::Sequential(_)) => {
                    let effect_type = match &other {
                        Effect::Future(_) => "future",
                        Effect::Delay { .. } => "delay",
                        _ => "sequential",
                    };
                    metrics::counter!("store.effects.executed", "type" => effect_type)
                        .increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone.clone());
                        let _pending_guard = pending_guard; // Decrement on drop

                        Self::run_inline(store, other, tracking_clone).await;
                    });
                }
            }
        }

        /// Run an effect to completion inside an already-spawned task
        ///
        /// Boxed for recursion: `Sequential` and `Parallel` nest arbitrarily.
        fn run_inline(
            store: Self,
            effect: Effect<A>,
            tracking: EffectTracking<A>,
        ) -> Pin<Box<dyn Future<Output = ()> + Send>>
        where
            R: Clone,
            E: Clone,
        {
            Box::pin(async move {
                match effect {
                    Effect::None => {}
                    Effect::Future(fut) => {
                        if let Some(action) = fut.await {
                            store.feed_back(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    }
                    Effect::Delay { duration, action } => {
                        tokio::time::sleep(duration).await;
                        store.feed_back(*action).await;
                    }
                    Effect::Parallel(effects) => {
                        let branches = effects
                            .into_iter()
                            .map(|effect| {
                                Self::run_inline(store.clone(), effect, tracking.clone())
                            })
                            .collect::<Vec<_>>();
                        futures::future::join_all(branches).await;
                    }
                    Effect::Sequential(effects) => {
                        for effect in effects {
                            Self::run_inline(store.clone(), effect, tracking.clone()).await;
                        }
                    }
                    // A nested cancellable re-enters the executor so it
                    // registers (and replaces) like a top-level one
                    cancellable @ Effect::Cancellable { .. } => {
                        store.execute_effect_internal(cancellable, tracking);
                    }
                    Effect::Cancel(id) => {
                        store.cancellations.cancel(id);
                    }
                }
            })
        }

        /// Broadcast an effect-produced action and feed it back into the reducer
        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            let _ = self.action_broadcast.send(action.clone());
            let _ = self.send(action).await;
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                cancellations: Arc::clone(&self.cancellations),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

// Test module
#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic
mod tests {
    use super::*;
    use storefront_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct TestState {
        value: i32,
        committed: Vec<String>,
    }

    impl TestState {
        fn new() -> Self {
            Self {
                value: 0,
                committed: Vec::new(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        ProduceEffect,
        ProduceDelayedAction,
        ProduceParallelEffects,
        ProduceSequentialEffects,
        Debounced { value: String },
        Commit { value: String },
        CancelDebounce,
    }

    #[derive(Clone)]
    struct TestEnv;

    #[derive(Clone)]
    struct TestReducer;

    const DEBOUNCE: EffectId = EffectId::new("test.debounce");

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                }
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                }
                TestAction::NoOp => smallvec![Effect::None],
                TestAction::ProduceEffect => {
                    smallvec![Effect::Future(Box::pin(async {
                        Some(TestAction::Increment)
                    }))]
                }
                TestAction::ProduceDelayedAction => {
                    smallvec![Effect::Delay {
                        duration: Duration::from_millis(10),
                        action: Box::new(TestAction::Increment),
                    }]
                }
                TestAction::ProduceParallelEffects => {
                    smallvec![Effect::Parallel(vec![
                        Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                        Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                        Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                    ])]
                }
                TestAction::ProduceSequentialEffects => {
                    smallvec![Effect::Sequential(vec![
                        Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                        Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                        Effect::Future(Box::pin(async { Some(TestAction::Decrement) })),
                    ])]
                }
                TestAction::Debounced { value } => {
                    smallvec![Effect::debounce(
                        DEBOUNCE,
                        Duration::from_millis(300),
                        TestAction::Commit { value },
                    )]
                }
                TestAction::Commit { value } => {
                    state.committed.push(value);
                    smallvec![Effect::None]
                }
                TestAction::CancelDebounce => {
                    smallvec![Effect::Cancel(DEBOUNCE)]
                }
            }
        }
    }

    fn test_store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::new(), TestReducer, TestEnv)
    }

    #[tokio::test]
    async fn test_store_creation() {
        let store = test_store();
        let value = store.state(|s| s.value).await;
        assert_eq!(value, 0);
    }

    #[tokio::test]
    async fn test_send_action() {
        let store = test_store();

        let _ = store.send(TestAction::Increment).await;
        let value = store.state(|s| s.value).await;
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn test_effect_future_feeds_back() {
        let store = test_store();

        let mut handle = store.send(TestAction::ProduceEffect).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        // The feedback action was processed by a nested send; give its
        // (empty) effect pass a moment to land
        tokio::time::sleep(Duration::from_millis(20)).await;

        let value = store.state(|s| s.value).await;
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn test_effect_delay() {
        let store = test_store();

        let _ = store.send(TestAction::ProduceDelayedAction).await;

        // Value should still be 0 immediately
        let value = store.state(|s| s.value).await;
        assert_eq!(value, 0);

        tokio::time::sleep(Duration::from_millis(50)).await;

        let value = store.state(|s| s.value).await;
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn test_effect_parallel() {
        let store = test_store();

        let mut handle = store.send(TestAction::ProduceParallelEffects).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let value = store.state(|s| s.value).await;
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_effect_sequential() {
        let store = test_store();

        let mut handle = store
            .send(TestAction::ProduceSequentialEffects)
            .await
            .unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let value = store.state(|s| s.value).await;
        assert_eq!(value, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_only_last_value_commits() {
        let store = test_store();

        // Three rapid edits within the 300ms quiet period
        for value in ["c", "ch", "cha"] {
            let _ = store
                .send(TestAction::Debounced {
                    value: value.to_string(),
                })
                .await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        // Let the final timer elapse
        tokio::time::sleep(Duration::from_millis(400)).await;

        let committed = store.state(|s| s.committed.clone()).await;
        assert_eq!(committed, vec!["cha".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_debounce() {
        let store = test_store();

        let _ = store
            .send(TestAction::Debounced {
                value: "abandoned".to_string(),
            })
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let _ = store.send(TestAction::CancelDebounce).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let committed = store.state(|s| s.committed.clone()).await;
        assert!(committed.is_empty(), "cancelled timer must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_timers_are_independent_per_id() {
        // Cancelling an id never registered is a no-op
        let store = test_store();

        let _ = store.send(TestAction::CancelDebounce).await;

        let _ = store
            .send(TestAction::Debounced {
                value: "kept".to_string(),
            })
            .await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        let committed = store.state(|s| s.committed.clone()).await;
        assert_eq!(committed, vec!["kept".to_string()]);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() {
        let store = test_store();

        store.shutdown(Duration::from_secs(1)).await.unwrap();

        let result = store.send(TestAction::Increment).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_pending_debounce() {
        let store = test_store();

        let _ = store
            .send(TestAction::Debounced {
                value: "stale".to_string(),
            })
            .await;

        // The pending 300ms timer is aborted rather than awaited
        store.shutdown(Duration::from_secs(1)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        let committed = store.state(|s| s.committed.clone()).await;
        assert!(committed.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_actions_receives_effect_output() {
        let store = test_store();
        let mut rx = store.subscribe_actions();

        let _ = store.send(TestAction::ProduceEffect).await;

        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action, TestAction::Increment);
    }

    #[tokio::test]
    async fn test_send_and_wait_for() {
        let store = test_store();

        let result = store
            .send_and_wait_for(
                TestAction::ProduceEffect,
                |action| matches!(action, TestAction::Increment),
                Duration::from_secs(1),
            )
            .await;

        assert!(matches!(result, Ok(TestAction::Increment)));
    }
}
