//! The dashboard state machine.
//!
//! [`DashboardReducer`] is the only place [`AppAction`]s are interpreted.
//! Every transition is synchronous; network work is returned as effects that
//! the store runs and feeds back as further actions.

use crate::api::DashboardApi;
use crate::notifications::with_latest_notification;
use crate::state::{AppAction, AppState};
use crate::types::Session;
use dashboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Dependencies injected into the reducer
#[derive(Clone)]
pub struct DashboardEnvironment {
    /// Source of notifications and courses
    pub api: Arc<dyn DashboardApi>,
}

impl DashboardEnvironment {
    /// Creates an environment around the given API
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for DashboardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for [`AppState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardReducer;

impl DashboardReducer {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for DashboardReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = DashboardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Mount => {
                smallvec![Effect::Parallel(vec![
                    fetch_notifications(env),
                    sync_courses(state.is_logged_in(), env),
                ])]
            },

            AppAction::Login { email, password } => {
                let was_logged_in = state.is_logged_in();
                tracing::info!(%email, "User logged in");
                state.session = Session::logged_in(email, password);

                if was_logged_in {
                    smallvec![Effect::None]
                } else {
                    smallvec![sync_courses(true, env)]
                }
            },

            AppAction::Logout => {
                if state.is_logged_in() {
                    tracing::info!(email = %state.session.email, "User logged out");
                }
                state.session = Session::default();
                state.courses.clear();
                smallvec![Effect::None]
            },

            AppAction::SetNotifications(list) => {
                state.notifications = list.into();
                tracing::debug!(count = state.notifications.len(), "Notifications replaced");
                smallvec![Effect::None]
            },

            AppAction::MarkNotificationRead(id) => {
                if state.notifications.remove(id).is_some() {
                    tracing::info!("Notification {id} has been marked as read");
                } else {
                    tracing::debug!(%id, "Ignoring read of unknown notification");
                }
                smallvec![Effect::None]
            },

            AppAction::SetCourses(list) => {
                if !state.is_logged_in() && !list.is_empty() {
                    tracing::debug!(count = list.len(), "Dropping courses delivered while logged out");
                } else {
                    state.courses = list;
                }
                smallvec![Effect::None]
            },

            AppAction::ShowDrawer => {
                state.drawer_open = true;
                smallvec![Effect::None]
            },

            AppAction::HideDrawer => {
                state.drawer_open = false;
                smallvec![Effect::None]
            },

            AppAction::ToggleDrawer => {
                state.drawer_open = !state.drawer_open;
                smallvec![Effect::None]
            },
        }
    }
}

/// Fetch notifications, merge in the latest notification, and replace the inbox
fn fetch_notifications(env: &DashboardEnvironment) -> Effect<AppAction> {
    let api = Arc::clone(&env.api);
    Effect::Future(Box::pin(async move {
        match api.notifications().await {
            Ok(list) => Some(AppAction::SetNotifications(with_latest_notification(list))),
            Err(error) => {
                tracing::error!(%error, "Failed to fetch notifications");
                None
            },
        }
    }))
}

/// Bring the course list in line with the session
///
/// Logged out resolves to an empty list without touching the network.
fn sync_courses(logged_in: bool, env: &DashboardEnvironment) -> Effect<AppAction> {
    if !logged_in {
        return Effect::Future(Box::pin(async { Some(AppAction::SetCourses(Vec::new())) }));
    }

    let api = Arc::clone(&env.api);
    Effect::Future(Box::pin(async move {
        match api.courses().await {
            Ok(list) => Some(AppAction::SetCourses(list)),
            Err(error) => {
                tracing::error!(%error, "Failed to fetch courses");
                None
            },
        }
    }))
}
