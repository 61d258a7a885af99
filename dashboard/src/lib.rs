//! # School Dashboard
//!
//! Application state for a small school dashboard: who is logged in, which
//! notifications are unread, which courses the user is enrolled in, and
//! whether the notification drawer is open.
//!
//! All state lives in one [`AppState`] owned by a [`DashboardStore`]. The
//! only way to change it is to dispatch an [`AppAction`]; the
//! [`DashboardReducer`] interprets actions and describes fetches as effects
//! that the store runs and feeds back.
//!
//! ```ignore
//! use dashboard::{DashboardContext, LoginForm, StaticApi};
//!
//! let ctx = DashboardContext::new(Arc::new(StaticApi::fixtures()), Arc::new(SystemClock), &StoreConfig::default());
//! ctx.mount().await?.wait().await;
//!
//! let mut form = LoginForm::new();
//! form.change_email("user@school.com");
//! form.change_password("password123");
//! if let Some(login) = form.submit() {
//!     ctx.dispatch(login).await?.wait().await;
//! }
//!
//! println!("{}", ctx.render().await);
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod login;
pub mod notifications;
pub mod reducer;
pub mod shortcut;
pub mod state;
pub mod types;
pub mod view;

pub use api::{DashboardApi, FetchError, HttpApi, StaticApi};
pub use config::{ConfigError, DashboardConfig};
pub use context::{DashboardContext, DashboardStore};
pub use login::{LoginForm, LoginFormError};
pub use notifications::Notifications;
pub use reducer::{DashboardEnvironment, DashboardReducer};
pub use shortcut::{KeyEvent, KeyboardEvents, LogoutShortcut};
pub use state::{AppAction, AppState};
pub use types::{Course, Notification, NotificationContent, NotificationId, NotificationKind, Session};
pub use view::DashboardView;
