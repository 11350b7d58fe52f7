use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::auth::AuthService;
use crate::app::comments::CommentService;
use crate::app::posts::{Deletion, NewPost, PostService, PostUpdate};
use crate::app::tokens::TokenService;
use crate::app::users::UserService;
use crate::domain::comment::Comment;
use crate::domain::post::Post;
use crate::domain::user::{User, UserWithPosts};
use crate::http::{AppError, BearerToken};
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse { status })
}

pub async fn unknown_endpoint() -> AppError {
    AppError::not_found("unknown endpoint")
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("malformed id"))
}

/// Resolve the bearer token to a user id, or 401. Operations that need a
/// requester identity funnel through here.
fn require_user(state: &AppState, token: Option<String>) -> Result<Uuid, AppError> {
    let token = token.ok_or_else(|| AppError::unauthorized("token missing or invalid"))?;
    let tokens = TokenService::new(state.token_secret, state.token_ttl_hours);
    let user_id = tokens.verify(&token).map_err(|err| {
        tracing::error!(error = ?err, "failed to verify token");
        AppError::internal("failed to verify token")
    })?;
    user_id.ok_or_else(|| AppError::unauthorized("token missing or invalid"))
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Absent and empty credentials take the same path.
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::bad_request("username and password are required"));
    }

    let tokens = TokenService::new(state.token_secret, state.token_ttl_hours);
    let service = AuthService::new(state.db.clone());
    let session = service
        .login(&username, &password, &tokens)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to login");
            AppError::internal("failed to login")
        })?;

    match session {
        Some(session) => Ok(Json(LoginResponse {
            token: session.token,
            username: session.username,
            name: session.name,
        })),
        None => Err(AppError::unauthorized("invalid username or password")),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<User>, AppError> {
    let (username, password) = match (payload.username, payload.password) {
        (Some(username), Some(password))
            if !username.trim().is_empty() && !password.trim().is_empty() =>
        {
            (username, password)
        }
        _ => return Err(AppError::unauthorized("username and password required")),
    };

    let service = AuthService::new(state.db.clone());
    let user = service
        .register(&username, payload.name, &password)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to register user");
            AppError::internal("failed to register user")
        })?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::bad_request("username must be unique")),
    }
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithPosts>>, AppError> {
    let service = UserService::new(state.db.clone());
    let users = service.list().await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list users");
        AppError::internal("failed to list users")
    })?;

    Ok(Json(users))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let service = PostService::new(state.db.clone());
    let posts = service.list().await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list posts");
        AppError::internal("failed to list posts")
    })?;

    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id)?;

    let service = PostService::new(state.db.clone());
    let post = service.get(id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to load post");
        AppError::internal("failed to load post")
    })?;

    post.map(Json).ok_or_else(|| AppError::not_found("post not found"))
}

pub async fn create_post(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let user_id = require_user(&state, token)?;

    let (title, author, url) = match (payload.title, payload.author, payload.url) {
        (Some(title), Some(author), Some(url))
            if !title.trim().is_empty()
                && !author.trim().is_empty()
                && !url.trim().is_empty() =>
        {
            (title, author, url)
        }
        _ => return Err(AppError::bad_request("title, author and url are required")),
    };
    if payload.likes.is_some_and(|likes| likes < 0) {
        return Err(AppError::bad_request("likes cannot be negative"));
    }

    let service = PostService::new(state.db.clone());
    let post = service
        .create(
            user_id,
            NewPost {
                title,
                author,
                url,
                likes: payload.likes,
            },
        )
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, user_id = %user_id, "failed to create post");
            AppError::internal("failed to create post")
        })?;

    match post {
        Some(post) => Ok((StatusCode::CREATED, Json(post))),
        None => Err(AppError::unauthorized("token missing or invalid")),
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id)?;

    if payload.likes.is_some_and(|likes| likes < 0) {
        return Err(AppError::bad_request("likes cannot be negative"));
    }

    let service = PostService::new(state.db.clone());
    let post = service
        .update(
            id,
            PostUpdate {
                title: payload.title,
                author: payload.author,
                url: payload.url,
                likes: payload.likes,
            },
        )
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %id, "failed to update post");
            AppError::internal("failed to update post")
        })?;

    post.map(Json).ok_or_else(|| AppError::not_found("post not found"))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let user_id = require_user(&state, token)?;

    let service = PostService::new(state.db.clone());
    let outcome = service.delete(id, user_id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, user_id = %user_id, "failed to delete post");
        AppError::internal("failed to delete post")
    })?;

    match outcome {
        Deletion::Deleted => Ok(StatusCode::NO_CONTENT),
        Deletion::Forbidden => Err(AppError::forbidden("post belongs to another user")),
        Deletion::NotFound => Err(AppError::not_found("post not found")),
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
    pub timestamp: Option<String>,
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let id = parse_id(&id)?;

    let service = CommentService::new(state.db.clone());
    let comments = service.list_for_post(id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to list comments");
        AppError::internal("failed to list comments")
    })?;

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let id = parse_id(&id)?;

    let text = payload.text.unwrap_or_default();
    if text.chars().count() < 2 {
        return Err(AppError::bad_request("text must be at least 2 characters"));
    }
    let timestamp = payload.timestamp.unwrap_or_default();
    if timestamp.chars().count() < 10 {
        return Err(AppError::bad_request(
            "timestamp must be at least 10 characters",
        ));
    }

    let service = CommentService::new(state.db.clone());
    let comment = service.create(id, text, timestamp).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to create comment");
        AppError::internal("failed to create comment")
    })?;

    match comment {
        Some(comment) => Ok((StatusCode::CREATED, Json(comment))),
        None => Err(AppError::bad_request("unknown post")),
    }
}

// ---------------------------------------------------------------------------
// Testing
// ---------------------------------------------------------------------------

/// Wipe users, posts and comments. Only routed in test environments.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM users")
        .execute(state.db.pool())
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to reset database");
            AppError::internal("failed to reset database")
        })?;
    sqlx::query("DELETE FROM posts")
        .execute(state.db.pool())
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to reset database");
            AppError::internal("failed to reset database")
        })?;

    Ok(StatusCode::NO_CONTENT)
}
