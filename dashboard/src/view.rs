//! View projections of the dashboard state.
//!
//! Each view is a pure function of an [`AppState`] snapshot (plus the current
//! year for the footer). Nothing here renders; the `Display` impls produce a
//! plain-text outline used by the demo binary.

use crate::state::AppState;
use crate::types::{Course, NotificationContent, NotificationId};
use serde::Serialize;
use std::fmt;

/// Dashboard title shown in the header
pub const DASHBOARD_TITLE: &str = "School Dashboard";

/// Title of the notifications panel
pub const NOTIFICATIONS_TITLE: &str = "Your notifications";

/// Intro line above a non-empty notification list
pub const NOTIFICATIONS_INTRO: &str = "Here is the list of notifications";

/// Line shown when the inbox is empty
pub const NO_NOTIFICATIONS: &str = "No new notifications for now";

/// Footer copy
///
/// The index page carries the short name; everywhere else the long one.
#[must_use]
pub const fn footer_copy(is_index: bool) -> &'static str {
    if is_index {
        "Holberton School"
    } else {
        "Holberton School main dashboard"
    }
}

/// Page header
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// Page title
    pub title: &'static str,
    /// `Welcome <email>` greeting, only while logged in
    pub welcome: Option<String>,
}

impl HeaderView {
    /// Project the header
    #[must_use]
    pub fn project(state: &AppState) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            welcome: state
                .is_logged_in()
                .then(|| format!("Welcome {}", state.session.email)),
        }
    }
}

/// Main section content
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BodyContent {
    /// Login form, shown while logged out
    Login {
        /// Prompt above the form
        prompt: &'static str,
    },
    /// Enrolled courses, shown while logged in
    Courses(Vec<Course>),
}

/// Static news block shown under the main section
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewsSection {
    /// Section title
    pub title: &'static str,
    /// Section text
    pub text: &'static str,
}

impl Default for NewsSection {
    fn default() -> Self {
        Self {
            title: "News from the School",
            text: "Holberton School news goes here",
        }
    }
}

/// Page body
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BodyView {
    /// Section title
    pub title: &'static str,
    /// Login form or course list
    pub content: BodyContent,
    /// News block
    pub news: NewsSection,
}

impl BodyView {
    /// Project the body
    #[must_use]
    pub fn project(state: &AppState) -> Self {
        let (title, content) = if state.is_logged_in() {
            ("Course list", BodyContent::Courses(state.courses.clone()))
        } else {
            (
                "Log in to continue",
                BodyContent::Login {
                    prompt: "Login to access the full dashboard",
                },
            )
        };

        Self {
            title,
            content,
            news: NewsSection::default(),
        }
    }
}

/// Page footer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterView {
    /// `Copyright <year> - Holberton School`
    pub copyright: String,
    /// Whether the "Contact us" link is shown
    pub contact_us: bool,
}

impl FooterView {
    /// Project the footer for the given year
    #[must_use]
    pub fn project(state: &AppState, year: i32) -> Self {
        Self {
            copyright: format!("Copyright {year} - {}", footer_copy(true)),
            contact_us: state.is_logged_in(),
        }
    }
}

/// One row of the notifications panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotificationItemView {
    /// Notification id, passed back when the row is clicked
    pub id: NotificationId,
    /// Display color derived from the kind
    pub color: &'static str,
    /// Text or markup
    pub content: NotificationContent,
}

/// What the open drawer shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DrawerContent {
    /// Nothing to read
    Empty,
    /// Notifications in inbox order
    List(Vec<NotificationItemView>),
}

/// Notifications panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotificationsPanel {
    /// Menu item title
    pub title: &'static str,
    /// Drawer content; `None` while the drawer is closed
    pub drawer: Option<DrawerContent>,
}

impl NotificationsPanel {
    /// Project the panel
    #[must_use]
    pub fn project(state: &AppState) -> Self {
        let drawer = state.drawer_open.then(|| {
            if state.notifications.is_empty() {
                DrawerContent::Empty
            } else {
                DrawerContent::List(
                    state
                        .notifications
                        .iter()
                        .map(|n| NotificationItemView {
                            id: n.id,
                            color: n.kind.color(),
                            content: n.content.clone(),
                        })
                        .collect(),
                )
            }
        });

        Self {
            title: NOTIFICATIONS_TITLE,
            drawer,
        }
    }
}

/// The whole page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Notifications panel
    pub notifications: NotificationsPanel,
    /// Header
    pub header: HeaderView,
    /// Body
    pub body: BodyView,
    /// Footer
    pub footer: FooterView,
}

impl DashboardView {
    /// Project every section from one snapshot
    #[must_use]
    pub fn project(state: &AppState, year: i32) -> Self {
        Self {
            notifications: NotificationsPanel::project(state),
            header: HeaderView::project(state),
            body: BodyView::project(state),
            footer: FooterView::project(state, year),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.notifications.title)?;
        match &self.notifications.drawer {
            None => {},
            Some(DrawerContent::Empty) => writeln!(f, "  {NO_NOTIFICATIONS}")?,
            Some(DrawerContent::List(items)) => {
                writeln!(f, "  {NOTIFICATIONS_INTRO}")?;
                for item in items {
                    let text = match &item.content {
                        NotificationContent::Value(value) => value.as_str(),
                        NotificationContent::Html(markup) => markup.html.as_str(),
                    };
                    writeln!(f, "  #{} ({}) {text}", item.id, item.color)?;
                }
            },
        }

        write!(f, "{}", self.header.title)?;
        if let Some(welcome) = &self.header.welcome {
            write!(f, " | {welcome} (logout)")?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.body.title)?;
        match &self.body.content {
            BodyContent::Login { prompt } => writeln!(f, "  {prompt}")?,
            BodyContent::Courses(courses) => {
                for course in courses {
                    writeln!(f, "  {} ({} credits)", course.name, course.credit)?;
                }
            },
        }
        writeln!(f, "{}", self.body.news.title)?;
        writeln!(f, "  {}", self.body.news.text)?;

        write!(f, "{}", self.footer.copyright)?;
        if self.footer.contact_us {
            write!(f, " | Contact us")?;
        }
        Ok(())
    }
}
