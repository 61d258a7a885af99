//! Domain types for the dashboard.
//!
//! These are the records the state machine stores: the user session, the
//! notifications in the inbox and the enrolled courses. Notifications and
//! courses share the JSON shape served by `notifications.json` and
//! `courses.json`.

use serde::{Deserialize, Serialize};

/// Identifier of a notification, unique within the inbox
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u32);

impl NotificationId {
    /// Creates a notification id
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency of a notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral notification
    #[default]
    Default,
    /// Visually flagged notification
    Urgent,
}

impl NotificationKind {
    /// Display color of the kind
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Default => "blue",
            Self::Urgent => "red",
        }
    }

    /// Whether the kind is flagged as urgent
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Urgent)
    }
}

/// Pre-rendered, trusted markup (`{"__html": "..."}` on the wire)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    /// The raw markup
    #[serde(rename = "__html")]
    pub html: String,
}

impl Markup {
    /// Wraps raw markup
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Body of a notification: exactly one of plain text or markup
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationContent {
    /// Plain text (`"value"` on the wire)
    Value(String),
    /// Trusted markup (`"html"` on the wire)
    Html(Markup),
}

/// A single notification in the inbox
///
/// On the wire the body is either a `value` string or an `html` object.
/// Records carrying both, or neither, are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NotificationRecord")]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// Urgency
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Text or markup body
    #[serde(flatten)]
    pub content: NotificationContent,
}

impl Notification {
    /// Creates a plain-text notification
    #[must_use]
    pub fn text(id: NotificationId, kind: NotificationKind, value: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: NotificationContent::Value(value.into()),
        }
    }

    /// Creates a markup notification
    #[must_use]
    pub fn html(id: NotificationId, kind: NotificationKind, html: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: NotificationContent::Html(Markup::new(html)),
        }
    }
}

/// Wire form of [`Notification`] before the body is checked
#[derive(Deserialize)]
struct NotificationRecord {
    id: NotificationId,
    #[serde(rename = "type")]
    kind: NotificationKind,
    value: Option<String>,
    html: Option<Markup>,
}

impl TryFrom<NotificationRecord> for Notification {
    type Error = &'static str;

    fn try_from(record: NotificationRecord) -> Result<Self, Self::Error> {
        let content = match (record.value, record.html) {
            (Some(value), None) => NotificationContent::Value(value),
            (None, Some(html)) => NotificationContent::Html(html),
            (Some(_), Some(_)) => return Err("notification has both `value` and `html`"),
            (None, None) => return Err("notification has neither `value` nor `html`"),
        };

        Ok(Self {
            id: record.id,
            kind: record.kind,
            content,
        })
    }
}

/// An enrolled course
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Credits awarded
    pub credit: u32,
}

impl Course {
    /// Creates a course
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, credit: u32) -> Self {
        Self {
            id,
            name: name.into(),
            credit,
        }
    }
}

/// The user session
///
/// `is_logged_in` is only ever set by a login transition; logout resets the
/// whole session to its default.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Email the user logged in with
    pub email: String,
    /// Password the user logged in with
    #[serde(skip_serializing)]
    pub password: String,
    /// Whether the user is logged in
    pub is_logged_in: bool,
}

impl Session {
    /// Creates a logged-in session
    #[must_use]
    pub fn logged_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            is_logged_in: true,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_logged_in", &self.is_logged_in)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_notification_reads_value_field() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 1,
            "type": "default",
            "value": "New course available"
        }))
        .unwrap();

        assert_eq!(
            notification,
            Notification::text(
                NotificationId::new(1),
                NotificationKind::Default,
                "New course available"
            )
        );
    }

    #[test]
    fn markup_notification_reads_html_object() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 3,
            "type": "urgent",
            "html": { "__html": "<strong>Urgent</strong>" }
        }))
        .unwrap();

        assert_eq!(notification.kind, NotificationKind::Urgent);
        assert_eq!(
            notification.content,
            NotificationContent::Html(Markup::new("<strong>Urgent</strong>"))
        );
    }

    #[test]
    fn notification_writes_wire_shape() {
        let notification =
            Notification::text(NotificationId::new(2), NotificationKind::Urgent, "New resume available");

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({ "id": 2, "type": "urgent", "value": "New resume available" })
        );
    }

    #[test]
    fn notification_without_body_is_rejected() {
        let result = serde_json::from_value::<Notification>(json!({ "id": 4, "type": "default" }));
        assert!(result.is_err());
    }

    #[test]
    fn notification_with_both_bodies_is_rejected() {
        let error = serde_json::from_value::<Notification>(json!({
            "id": 5,
            "type": "default",
            "value": "plain",
            "html": { "__html": "<b>x</b>" }
        }))
        .unwrap_err();

        assert!(error.to_string().contains("both `value` and `html`"));
    }

    #[test]
    fn kind_colors() {
        assert_eq!(NotificationKind::Default.color(), "blue");
        assert_eq!(NotificationKind::Urgent.color(), "red");
        assert!(NotificationKind::Urgent.is_urgent());
    }

    #[test]
    fn session_debug_redacts_password() {
        let session = Session::logged_in("a@b.com", "longpassword");
        let debug = format!("{session:?}");

        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("longpassword"));
    }

    #[test]
    fn session_json_omits_password() {
        let session = Session::logged_in("a@b.com", "longpassword");
        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            json!({ "email": "a@b.com", "is_logged_in": true })
        );
    }
}
