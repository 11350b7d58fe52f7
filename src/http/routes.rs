use axum::{routing::delete, routing::get, routing::post, routing::put, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn login() -> Router<AppState> {
    Router::new().route("/api/login", post(handlers::login))
}

pub fn users() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users", post(handlers::register_user))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts", post(handlers::create_post))
        .route("/api/posts/:id", get(handlers::get_post))
        .route("/api/posts/:id", put(handlers::update_post))
        .route("/api/posts/:id", delete(handlers::delete_post))
        .route("/api/posts/:id/comments", get(handlers::list_comments))
        .route("/api/posts/:id/comments", post(handlers::create_comment))
}

/// Mounted only when the test-routes flag is set.
pub fn testing() -> Router<AppState> {
    Router::new().route("/api/testing/reset", post(handlers::reset))
}
