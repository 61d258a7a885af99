//! Data sources for notifications and courses.
//!
//! [`DashboardApi`] is the seam the reducer's fetch effects go through.
//! [`HttpApi`] talks to the JSON endpoints; [`StaticApi`] serves fixed lists
//! for offline runs and tests.

use crate::types::{Course, Notification, NotificationId, NotificationKind};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the JSON endpoints
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Errors returned by a [`DashboardApi`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not the expected JSON document
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Source of notifications and courses
///
/// Dyn-compatible so effects can capture an `Arc<dyn DashboardApi>`.
pub trait DashboardApi: Send + Sync {
    /// Fetch the notification list
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body cannot be decoded.
    fn notifications(&self) -> BoxFuture<'_, Result<Vec<Notification>, FetchError>>;

    /// Fetch the course list
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body cannot be decoded.
    fn courses(&self) -> BoxFuture<'_, Result<Vec<Course>, FetchError>>;
}

#[derive(Deserialize)]
struct NotificationsBody {
    notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct CoursesBody {
    courses: Vec<Course>,
}

/// HTTP implementation backed by `reqwest`
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the given base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are made against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "Fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DashboardApi for HttpApi {
    fn notifications(&self) -> BoxFuture<'_, Result<Vec<Notification>, FetchError>> {
        Box::pin(async move {
            let body: NotificationsBody = self.get_json("notifications.json").await?;
            Ok(body.notifications)
        })
    }

    fn courses(&self) -> BoxFuture<'_, Result<Vec<Course>, FetchError>> {
        Box::pin(async move {
            let body: CoursesBody = self.get_json("courses.json").await?;
            Ok(body.courses)
        })
    }
}

/// In-memory implementation serving fixed lists
///
/// Clones share the request counters.
#[derive(Clone, Debug, Default)]
pub struct StaticApi {
    notifications: Vec<Notification>,
    courses: Vec<Course>,
    latency: Option<Duration>,
    failing: Arc<AtomicBool>,
    notification_requests: Arc<AtomicUsize>,
    course_requests: Arc<AtomicUsize>,
}

impl StaticApi {
    /// An API serving empty lists
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An API serving the same data as the bundled `notifications.json` and `courses.json`
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new()
            .with_notifications(vec![
                Notification::text(
                    NotificationId::new(1),
                    NotificationKind::Default,
                    "New course available",
                ),
                Notification::text(
                    NotificationId::new(2),
                    NotificationKind::Urgent,
                    "New resume available",
                ),
                crate::notifications::latest_notification(),
            ])
            .with_courses(vec![
                Course::new(1, "ES6", 60),
                Course::new(2, "Webpack", 20),
                Course::new(3, "React", 40),
            ])
    }

    /// Serve these notifications
    #[must_use]
    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Serve these courses
    #[must_use]
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    /// Delay every response
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every request fail until [`StaticApi::set_failing`] turns it off
    #[must_use]
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Toggle failure mode
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of notification requests served so far
    #[must_use]
    pub fn notification_requests(&self) -> usize {
        self.notification_requests.load(Ordering::SeqCst)
    }

    /// Number of course requests served so far
    #[must_use]
    pub fn course_requests(&self) -> usize {
        self.course_requests.load(Ordering::SeqCst)
    }

    async fn respond<T: Clone>(&self, data: &[T], counter: &AtomicUsize) -> Result<Vec<T>, FetchError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::RequestFailed("static api is failing".to_string()));
        }
        Ok(data.to_vec())
    }
}

impl DashboardApi for StaticApi {
    fn notifications(&self) -> BoxFuture<'_, Result<Vec<Notification>, FetchError>> {
        Box::pin(self.respond(&self.notifications, &self.notification_requests))
    }

    fn courses(&self) -> BoxFuture<'_, Result<Vec<Course>, FetchError>> {
        Box::pin(self.respond(&self.courses, &self.course_requests))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixtures_match_bundled_data() {
        let api = StaticApi::fixtures();

        let notifications = api.notifications().await.unwrap();
        let ids: Vec<u32> = notifications.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let courses = api.courses().await.unwrap();
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ES6", "Webpack", "React"]);
    }

    #[tokio::test]
    async fn counters_are_shared_between_clones() {
        let api = StaticApi::new();
        let clone = api.clone();

        clone.courses().await.unwrap();
        clone.courses().await.unwrap();
        api.notifications().await.unwrap();

        assert_eq!(api.course_requests(), 2);
        assert_eq!(api.notification_requests(), 1);
    }

    #[tokio::test]
    async fn failing_mode_can_be_toggled() {
        let api = StaticApi::fixtures().failing();
        assert!(matches!(api.courses().await, Err(FetchError::RequestFailed(_))));

        api.set_failing(false);
        assert_eq!(api.courses().await.unwrap().len(), 3);
    }

    #[test]
    fn http_api_trims_trailing_slash() {
        assert_eq!(HttpApi::new("http://example.test/").base_url(), "http://example.test");
        assert_eq!(HttpApi::default().base_url(), DEFAULT_BASE_URL);
    }
}
