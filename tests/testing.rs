//! Test-environment reset route and health check. Needs
//! `TEST_DATABASE_URL`; the harness enables the testing routes.

mod common;

use axum::http::StatusCode;
use common::app;

#[tokio::test]
async fn reset_clears_posts_and_users() {
    let Some(app) = app().await else { return };
    let user = app.create_user("reset_victim").await;
    app.create_post(&user, "reset fodder", 1).await;

    let resp = app
        .request(axum::http::Method::POST, "/api/testing/reset", None, &[])
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get("/api/posts", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.json().as_array().unwrap().is_empty());

    let resp = app.get("/api/users", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let Some(app) = app().await else { return };

    let resp = app.get("/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"].as_str().unwrap(), "ok");
}
