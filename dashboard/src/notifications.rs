//! The notification inbox.
//!
//! Notifications are kept as an ordered mapping keyed by id. Iteration order is
//! insertion order; nothing re-sorts by kind or id. Reading a notification
//! removes it for good.

use crate::types::{Notification, NotificationId, NotificationKind};
use serde::Serialize;

/// Id whose content is always replaced by the synthesized latest notification
pub const SENTINEL_ID: NotificationId = NotificationId::new(3);

/// Markup of the synthesized latest notification
pub const LATEST_NOTIFICATION_HTML: &str = "<strong>Urgent requirement</strong> - complete by EOD";

/// Build the synthesized "latest notification" record
#[must_use]
pub fn latest_notification() -> Notification {
    Notification::html(SENTINEL_ID, NotificationKind::Urgent, LATEST_NOTIFICATION_HTML)
}

/// Merge the latest notification into a fetched list
///
/// The entry carrying [`SENTINEL_ID`] is overwritten in place; when no such
/// entry exists the latest notification is appended. Every other entry keeps
/// its content and position.
#[must_use]
pub fn with_latest_notification(mut notifications: Vec<Notification>) -> Vec<Notification> {
    let latest = latest_notification();
    match notifications.iter_mut().find(|n| n.id == SENTINEL_ID) {
        Some(slot) => *slot = latest,
        None => notifications.push(latest),
    }
    notifications
}

/// Ordered mapping of notifications keyed by id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    /// Creates an empty inbox
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a notification
    ///
    /// An existing entry with the same id is replaced in place and keeps its
    /// position; otherwise the notification is appended.
    pub fn insert(&mut self, notification: Notification) {
        match self.entries.iter_mut().find(|n| n.id == notification.id) {
            Some(slot) => *slot = notification,
            None => self.entries.push(notification),
        }
    }

    /// Remove the notification with the given id, if present
    pub fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.entries.iter().position(|n| n.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Returns the notification with the given id
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Whether a notification with the given id exists
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Number of notifications
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the inbox is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.entries.iter()
    }

    /// Ids in insertion order
    #[must_use]
    pub fn ids(&self) -> Vec<NotificationId> {
        self.entries.iter().map(|n| n.id).collect()
    }
}

impl FromIterator<Notification> for Notifications {
    fn from_iter<I: IntoIterator<Item = Notification>>(iter: I) -> Self {
        let mut notifications = Self::new();
        for notification in iter {
            notifications.insert(notification);
        }
        notifications
    }
}

impl From<Vec<Notification>> for Notifications {
    fn from(list: Vec<Notification>) -> Self {
        list.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Notifications {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
