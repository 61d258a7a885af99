//! Keyboard logout shortcut.
//!
//! Key presses are published on a [`KeyboardEvents`] channel. Installing a
//! [`LogoutShortcut`] spawns a listener that asks for confirmation and logs
//! out on `ctrl+h`. The listener lives exactly as long as the returned guard.

use crate::context::DashboardContext;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Message passed to the confirmation callback before logging out
pub const LOGOUT_CONFIRMATION: &str = "Logging you out";

/// A key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key, lowercase
    pub key: char,
    /// Whether the control modifier was held
    pub ctrl: bool,
}

impl KeyEvent {
    /// A plain key press
    #[must_use]
    pub fn key(key: char) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            ctrl: false,
        }
    }

    /// A key press with control held
    #[must_use]
    pub fn ctrl(key: char) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            ctrl: true,
        }
    }

    /// Whether this is `ctrl+h`
    #[must_use]
    pub const fn is_logout_shortcut(&self) -> bool {
        self.ctrl && self.key == 'h'
    }
}

/// Broadcast channel of key presses
#[derive(Clone, Debug)]
pub struct KeyboardEvents {
    sender: broadcast::Sender<KeyEvent>,
}

impl KeyboardEvents {
    /// Creates a channel buffering up to `capacity` presses per listener
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a key press, returning how many listeners received it
    pub fn press(&self, event: KeyEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to key presses
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<KeyEvent> {
        self.sender.subscribe()
    }

    /// Number of active listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for KeyboardEvents {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Guard for an installed logout shortcut
///
/// Dropping the guard stops the listener.
#[derive(Debug)]
#[must_use = "the shortcut is removed when the guard is dropped"]
pub struct LogoutShortcut {
    task: Option<JoinHandle<()>>,
}

impl LogoutShortcut {
    /// Listen for `ctrl+h` and log out
    ///
    /// `confirm` is called with [`LOGOUT_CONFIRMATION`] and must return
    /// before the logout is dispatched.
    pub fn install<F>(events: &KeyboardEvents, context: DashboardContext, confirm: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut rx = events.subscribe();

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.is_logout_shortcut() => {
                        tracing::debug!("Logout shortcut pressed");
                        confirm(LOGOUT_CONFIRMATION);
                        if let Err(error) = context.log_out().await {
                            tracing::warn!(%error, "Logout shortcut could not dispatch");
                            break;
                        }
                    },
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Keyboard listener lagged, {} presses skipped", skipped);
                    },
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            tracing::trace!("Logout shortcut listener stopped");
        });

        Self { task: Some(task) }
    }

    /// Stop the listener and wait until it is gone
    pub async fn uninstall(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for LogoutShortcut {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ctrl_h_is_the_shortcut() {
        assert!(KeyEvent::ctrl('h').is_logout_shortcut());
        assert!(KeyEvent::ctrl('H').is_logout_shortcut());
        assert!(!KeyEvent::key('h').is_logout_shortcut());
        assert!(!KeyEvent::ctrl('j').is_logout_shortcut());
    }

    #[test]
    fn press_without_listeners_reaches_nobody() {
        let events = KeyboardEvents::default();
        assert_eq!(events.press(KeyEvent::ctrl('h')), 0);
    }
}
