//! The handle presentation code is given.
//!
//! [`DashboardContext`] wraps the store. Consumers read snapshots, call the
//! dispatch-bound handlers and subscribe to state changes through it. They
//! never write state directly.

use crate::api::DashboardApi;
use crate::reducer::{DashboardEnvironment, DashboardReducer};
use crate::state::{AppAction, AppState};
use crate::types::{NotificationId, Session};
use crate::view::DashboardView;
use chrono::Datelike;
use dashboard_core::environment::Clock;
use dashboard_runtime::{EffectHandle, Store, StoreConfig, StoreError, Subscription};
use std::sync::Arc;

/// The store type driving the dashboard
pub type DashboardStore = Store<AppState, AppAction, DashboardEnvironment, DashboardReducer>;

/// Cloneable handle over the dashboard store
#[derive(Clone)]
pub struct DashboardContext {
    store: DashboardStore,
    clock: Arc<dyn Clock>,
}

impl DashboardContext {
    /// Build a store with the default initial state around the given API
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, clock: Arc<dyn Clock>, config: &StoreConfig) -> Self {
        let store = Store::with_config(
            AppState::default(),
            DashboardReducer::new(),
            DashboardEnvironment::new(api),
            config,
        );
        Self::from_store(store, clock)
    }

    /// Wrap an existing store
    #[must_use]
    pub fn from_store(store: DashboardStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &DashboardStore {
        &self.store
    }

    /// Owned snapshot of the whole state
    pub async fn snapshot(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Current session
    pub async fn session(&self) -> Session {
        self.store.state(|state| state.session.clone()).await
    }

    /// Dispatch an arbitrary action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: AppAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Log in; the credentials are expected to be validated already
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn log_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::Login {
            email: email.into(),
            password: password.into(),
        })
        .await
    }

    /// Log out
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn log_out(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::Logout).await
    }

    /// Mark a notification as read
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::MarkNotificationRead(id)).await
    }

    /// Open the drawer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn show_drawer(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::ShowDrawer).await
    }

    /// Close the drawer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn hide_drawer(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::HideDrawer).await
    }

    /// Flip the drawer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn toggle_drawer(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::ToggleDrawer).await
    }

    /// Load notifications and sync courses, as on first render
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn mount(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AppAction::Mount).await
    }

    /// Be called with every new state
    ///
    /// The listener runs once per dispatch, before the next action is
    /// reduced. Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Project the current state into a page view
    pub async fn render(&self) -> DashboardView {
        let year = self.clock.now().year();
        self.store
            .state(|state| DashboardView::project(state, year))
            .await
    }

    /// Stop accepting actions and wait for in-flight fetches to land
    ///
    /// Waits at most the shutdown timeout the store was configured with.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if fetches are still running
    /// when the timeout expires.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.store.shutdown(self.store.shutdown_timeout()).await
    }
}

impl std::fmt::Debug for DashboardContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardContext")
            .field("version", &self.store.version())
            .finish_non_exhaustive()
    }
}
