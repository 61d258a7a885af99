//! Application state and the actions that drive it.

use crate::notifications::Notifications;
use crate::types::{Course, Notification, NotificationId, Session};
use serde::Serialize;

/// The aggregate dashboard state
///
/// Owned exclusively by the store. Consumers only ever see clones or
/// borrowed views handed to them by the context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppState {
    /// Identity and login flag
    pub session: Session,
    /// Notification inbox, in insertion order
    pub notifications: Notifications,
    /// Enrolled courses; empty while logged out
    pub courses: Vec<Course>,
    /// Whether the notification drawer is open
    pub drawer_open: bool,
}

impl AppState {
    /// Whether the user is logged in
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            notifications: Notifications::new(),
            courses: Vec::new(),
            drawer_open: true,
        }
    }
}

/// Every input the dashboard state machine understands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// The dashboard was mounted: load notifications and sync courses
    Mount,

    /// Log in with credentials already validated by the login form
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Log out and clear everything tied to the session
    Logout,

    /// Replace the notification inbox wholesale
    SetNotifications(Vec<Notification>),

    /// Remove a notification; unknown ids are ignored
    MarkNotificationRead(NotificationId),

    /// Replace the course list wholesale
    SetCourses(Vec<Course>),

    /// Open the notification drawer
    ShowDrawer,

    /// Close the notification drawer
    HideDrawer,

    /// Flip the notification drawer
    ToggleDrawer,
}
