//! `HttpApi` against a mock server.

#![allow(clippy::unwrap_used)]

use dashboard::notifications::SENTINEL_ID;
use dashboard::{
    Course, DashboardApi, DashboardContext, FetchError, HttpApi, NotificationId, NotificationKind,
};
use dashboard_runtime::StoreConfig;
use dashboard_testing::test_clock;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn notifications_body() -> serde_json::Value {
    json!({
        "notifications": [
            { "id": 1, "type": "default", "value": "New course available" },
            { "id": 2, "type": "urgent", "value": "New resume available" },
            { "id": 3, "type": "urgent", "html": { "__html": "" } }
        ]
    })
}

fn courses_body() -> serde_json::Value {
    json!({
        "courses": [
            { "id": 1, "name": "ES6", "credit": 60 },
            { "id": 2, "name": "Webpack", "credit": 20 },
            { "id": 3, "name": "React", "credit": 40 }
        ]
    })
}

#[tokio::test]
async fn fetches_both_documents() {
    let server = MockServer::start().await;
    serve(&server, "/notifications.json", ResponseTemplate::new(200).set_body_json(notifications_body())).await;
    serve(&server, "/courses.json", ResponseTemplate::new(200).set_body_json(courses_body())).await;

    let api = HttpApi::new(server.uri());

    let notifications = api.notifications().await.unwrap();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[1].kind, NotificationKind::Urgent);

    let courses = api.courses().await.unwrap();
    assert_eq!(courses[2], Course::new(3, "React", 40));
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let server = MockServer::start().await;
    serve(&server, "/courses.json", ResponseTemplate::new(500)).await;

    let error = HttpApi::new(server.uri()).courses().await.unwrap_err();
    assert!(matches!(error, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/notifications.json",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
    )
    .await;

    let error = HttpApi::new(server.uri()).notifications().await.unwrap_err();
    assert!(matches!(error, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_failure() {
    let error = HttpApi::new("http://127.0.0.1:9").notifications().await.unwrap_err();
    assert!(matches!(error, FetchError::RequestFailed(_)));
}

#[tokio::test]
async fn mount_and_login_over_http() {
    let server = MockServer::start().await;
    serve(&server, "/notifications.json", ResponseTemplate::new(200).set_body_json(notifications_body())).await;
    serve(&server, "/courses.json", ResponseTemplate::new(200).set_body_json(courses_body())).await;

    let ctx = DashboardContext::new(
        Arc::new(HttpApi::new(server.uri())),
        Arc::new(test_clock()),
        &StoreConfig::default(),
    );

    ctx.mount()
        .await
        .unwrap()
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
    ctx.log_in("user@school.com", "password123")
        .await
        .unwrap()
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let state = ctx.snapshot().await;
    assert_eq!(
        state.notifications.ids(),
        vec![NotificationId::new(1), NotificationId::new(2), SENTINEL_ID]
    );
    let sentinel = serde_json::to_value(state.notifications.get(SENTINEL_ID).unwrap()).unwrap();
    assert_eq!(
        sentinel["html"]["__html"],
        "<strong>Urgent requirement</strong> - complete by EOD"
    );
    assert_eq!(state.courses.len(), 3);

    let requests = server.received_requests().await.unwrap();
    let courses_hits = requests.iter().filter(|r| r.url.path() == "/courses.json").count();
    assert_eq!(courses_hits, 1);
}
