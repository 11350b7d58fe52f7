use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct CommentService {
    db: Db,
}

impl CommentService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, text, \"timestamp\", post_id, created_at \
             FROM comments WHERE post_id = $1 \
             ORDER BY created_at, id",
        )
        .bind(post_id)
        .fetch_all(self.db.pool())
        .await?;

        let comments = rows
            .into_iter()
            .map(|row| Comment {
                id: row.get("id"),
                text: row.get("text"),
                timestamp: row.get("timestamp"),
                post_id: row.get("post_id"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(comments)
    }

    /// Store a comment against a post. `None` when the referenced post
    /// does not exist (the foreign key rejects the insert).
    pub async fn create(
        &self,
        post_id: Uuid,
        text: String,
        timestamp: String,
    ) -> Result<Option<Comment>> {
        let result = sqlx::query(
            "INSERT INTO comments (text, \"timestamp\", post_id) \
             VALUES ($1, $2, $3) \
             RETURNING id, text, \"timestamp\", post_id, created_at",
        )
        .bind(text)
        .bind(timestamp)
        .bind(post_id)
        .fetch_one(self.db.pool())
        .await;

        match result {
            Ok(row) => Ok(Some(Comment {
                id: row.get("id"),
                text: row.get("text"),
                timestamp: row.get("timestamp"),
                post_id: row.get("post_id"),
                created_at: row.get("created_at"),
            })),
            Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
