use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::{PostRef, UserWithPosts};
use crate::infra::db::Db;

#[derive(Clone)]
pub struct UserService {
    db: Db,
}

impl UserService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All users with their owned posts attached, title/author only.
    /// Posts come back in creation order per user.
    pub async fn list(&self) -> Result<Vec<UserWithPosts>> {
        let rows = sqlx::query(
            "SELECT u.id, u.username, u.name, u.created_at, \
                    p.id AS post_id, p.title, p.author \
             FROM users u \
             LEFT JOIN posts p ON p.user_id = u.id \
             ORDER BY u.created_at, u.id, p.created_at, p.id",
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut users: Vec<UserWithPosts> = Vec::new();
        for row in rows {
            let user_id: Uuid = row.get("id");
            if users.last().map(|user| user.id) != Some(user_id) {
                users.push(UserWithPosts {
                    id: user_id,
                    username: row.get("username"),
                    name: row.get("name"),
                    created_at: row.get("created_at"),
                    posts: Vec::new(),
                });
            }
            let post_id: Option<Uuid> = row.get("post_id");
            if let (Some(post_id), Some(user)) = (post_id, users.last_mut()) {
                user.posts.push(PostRef {
                    id: post_id,
                    title: row.get("title"),
                    author: row.get("author"),
                });
            }
        }

        Ok(users)
    }
}
