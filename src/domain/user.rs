use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A registered account. The password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Slice of a post attached to its owner in user listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostRef {
    pub id: Uuid,
    pub title: String,
    pub author: String,
}

/// User with the creation-ordered projection of the posts they own.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithPosts {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub posts: Vec<PostRef>,
}
