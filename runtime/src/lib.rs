//! # Dashboard Runtime
//!
//! Runtime implementation for the dashboard state machine.
//!
//! This crate provides the Store runtime that coordinates reducer execution,
//! effect handling and state propagation.
//!
//! ## Core Components
//!
//! - **Store**: The single writer that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Listeners**: Synchronous state subscribers notified once per dispatch
//!
//! ## Example
//!
//! ```ignore
//! use dashboard_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let _subscription = store.subscribe(|state| println!("new state: {state:?}"));
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use dashboard_core::{effect::Effect, reducer::Reducer};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Reducer transitions themselves never fail; these errors only describe
    /// the runtime refusing or giving up on work.
    #[derive(Error, Debug)]
    pub enum StoreError {
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

        /// Timeout waiting for the effects of a dispatch
        #[error("Timeout waiting for effects")]
        Timeout,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use dashboard_runtime::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default().with_shutdown_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Default timeout for graceful shutdown
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(shutdown_timeout: Duration) -> Self {
        Self { shutdown_timeout }
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects of one
/// dispatch to complete. An effect that produces an action counts as complete
/// once that action has itself been reduced.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Mount).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // Both fetches have resolved and been folded into state
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle and the tracking context feeding it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracking context is gone, nothing left to wait for
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
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

/// Internal: RAII guard that decrements effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
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

/// A state listener, called with the new state after every dispatch
type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Internal: registry of state listeners shared by all clones of a store
struct ListenerRegistry<S> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener<S>)>>,
}

impl<S> ListenerRegistry<S> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn insert(&self, listener: Listener<S>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clone the current listeners out so none are invoked under the lock
    fn snapshot(&self) -> Vec<Listener<S>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Scoped state subscription returned by [`Store::subscribe`]
///
/// The listener stays registered for as long as this value lives. Dropping it
/// (or calling [`Subscription::cancel`]) unregisters the listener, so the
/// next dispatch no longer reaches it.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Unsubscribe explicitly
    pub fn cancel(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicU64, AtomicUsize, DecrementGuard, Duration,
        Effect, EffectHandle, EffectTracking, ListenerRegistry, Ordering, Reducer, RwLock,
        StoreConfig, StoreError, Subscription, Weak,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock)
    /// 2. Reducer (all transition logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. State listeners, invoked once per dispatch before the lock is released
    ///
    /// The Store is the only writer. Everything else reads through
    /// [`Store::state`] or a listener.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        version: Arc<AtomicU64>,
        listeners: Arc<ListenerRegistry<S>>,
        shutdown_timeout: Duration,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, &StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: &StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                version: Arc::new(AtomicU64::new(0)),
                listeners: Arc::new(ListenerRegistry::new()),
                shutdown_timeout: config.shutdown_timeout,
            }
        }

        /// Number of dispatches reduced so far
        ///
        /// Every dispatch bumps the version exactly once, no-op transitions included.
        #[must_use]
        pub fn version(&self) -> u64 {
            self.version.load(Ordering::SeqCst)
        }

        /// Number of currently registered state listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        /// Register a state listener
        ///
        /// The listener is called with the new state after every dispatch,
        /// while the write lock is still held. Every listener therefore sees
        /// each state before the next action is reduced. Listeners must be
        /// quick and must not block on the store.
        pub fn subscribe<F>(&self, listener: F) -> Subscription
        where
            F: Fn(&S) + Send + Sync + 'static,
        {
            let id = self.listeners.insert(Arc::new(listener));
            tracing::trace!(listener_id = id, "State listener registered");

            let registry: Weak<ListenerRegistry<S>> = Arc::downgrade(&self.listeners);
            Subscription::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.remove(id);
                    tracing::trace!(listener_id = id, "State listener removed");
                }
            })
        }

        /// Shutdown timeout from the [`StoreConfig`] this store was built with
        #[must_use]
        pub const fn shutdown_timeout(&self) -> Duration {
            self.shutdown_timeout
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions from callers)
        /// 2. Waits for pending effects to complete (with timeout)
        ///
        /// Actions produced by effects that were already running are still
        /// reduced while the store drains, so in-flight fetches land in state
        /// before this returns. Only [`Store::send`] is closed.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(20);

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
                        "Shutdown timeout: {} effects still running", pending
                    );
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store (dispatch)
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Notifies every state listener with the new state
        /// 4. Executes returned effects asynchronously
        ///
        /// Concurrent `send()` calls serialize at the reducer level. Effects
        /// may complete in any order; the last one to resolve wins.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            Ok(self.dispatch(action).await)
        }

        /// Reduce one action and start its effects, ignoring the shutdown flag
        async fn dispatch(&self, action: A) -> EffectHandle {
            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
                let listeners = self.listeners.snapshot();
                for listener in &listeners {
                    listener(&*state);
                }

                tracing::trace!(
                    version,
                    listeners = listeners.len(),
                    effects = effects.len(),
                    "Reducer completed"
                );

                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            handle
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let snapshot = store.state(Clone::clone).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Execute an effect with tracking
        ///
        /// Effect failures never halt the store: a panicking effect task is
        /// contained by tokio, and the [`DecrementGuard`] still updates the
        /// tracking counter. The pending guard is released only after the
        /// produced action has been reduced, so shutdown waits for it.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned per spawned effect
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            if store.shutdown.load(Ordering::Acquire) {
                                tracing::debug!("Reducing effect result while draining");
                            }
                            let _ = store.dispatch(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    for effect in effects {
                        self.execute_effect(effect, tracking.clone());
                    }
                },
            }
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
                version: Arc::clone(&self.version),
                listeners: Arc::clone(&self.listeners),
                shutdown_timeout: self.shutdown_timeout,
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
