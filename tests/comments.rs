//! Comment creation and listing. Needs `TEST_DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::app;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_and_list_comments_for_a_post() {
    let Some(app) = app().await else { return };
    let user = app.create_user("comment_crud").await;
    let post_id = app.create_post(&user, "commented", 0).await;

    let resp = app
        .post_json(
            &format!("/api/posts/{}/comments", post_id),
            json!({ "text": "great read", "timestamp": "2026-08-30T12:00:00Z" }),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["text"].as_str().unwrap(), "great read");
    assert_eq!(body["post_id"].as_str().unwrap(), post_id.to_string());

    let resp = app
        .get(&format!("/api/posts/{}/comments", post_id), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let comments = resp.json();
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"].as_str().unwrap(), "great read");
}

#[tokio::test]
async fn comments_are_scoped_to_their_post() {
    let Some(app) = app().await else { return };
    let user = app.create_user("comment_scope").await;
    let first = app.create_post(&user, "first scoped", 0).await;
    let second = app.create_post(&user, "second scoped", 0).await;

    let resp = app
        .post_json(
            &format!("/api/posts/{}/comments", first),
            json!({ "text": "only on first", "timestamp": "2026-08-30T12:00:00Z" }),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let resp = app
        .get(&format!("/api/posts/{}/comments", second), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comment_text_shorter_than_two_chars_is_rejected() {
    let Some(app) = app().await else { return };
    let user = app.create_user("comment_short").await;
    let post_id = app.create_post(&user, "strict", 0).await;

    let resp = app
        .post_json(
            &format!("/api/posts/{}/comments", post_id),
            json!({ "text": "x", "timestamp": "2026-08-30T12:00:00Z" }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_timestamp_shorter_than_ten_chars_is_rejected() {
    let Some(app) = app().await else { return };
    let user = app.create_user("comment_badts").await;
    let post_id = app.create_post(&user, "strict ts", 0).await;

    let resp = app
        .post_json(
            &format!("/api/posts/{}/comments", post_id),
            json!({ "text": "fine text", "timestamp": "short" }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_on_unknown_post_is_rejected() {
    let Some(app) = app().await else { return };

    let resp = app
        .post_json(
            &format!("/api/posts/{}/comments", Uuid::new_v4()),
            json!({ "text": "into the void", "timestamp": "2026-08-30T12:00:00Z" }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_message(), "unknown post");
}

#[tokio::test]
async fn comment_with_malformed_post_id_is_bad_request() {
    let Some(app) = app().await else { return };

    let resp = app
        .post_json(
            "/api/posts/not-an-id/comments",
            json!({ "text": "whatever", "timestamp": "2026-08-30T12:00:00Z" }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_message(), "malformed id");
}
