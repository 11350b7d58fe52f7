use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::Post;
use crate::infra::db::Db;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: Option<i64>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Result of a delete attempt by a resolved requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Forbidden,
    NotFound,
}

#[derive(Clone)]
pub struct PostService {
    db: Db,
}

impl PostService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All posts, oldest first, with the owner's username and name joined
    /// in as a read-time projection.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT p.id, p.title, p.author, p.url, p.likes, p.user_id, p.created_at, \
                    u.username AS owner_username, u.name AS owner_name \
             FROM posts p \
             JOIN users u ON p.user_id = u.id \
             ORDER BY p.created_at, p.id",
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            posts.push(Post {
                id: row.get("id"),
                title: row.get("title"),
                author: row.get("author"),
                url: row.get("url"),
                likes: row.get("likes"),
                user_id: row.get("user_id"),
                owner_username: Some(row.get("owner_username")),
                owner_name: row.get("owner_name"),
                created_at: row.get("created_at"),
            });
        }

        Ok(posts)
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, title, author, url, likes, user_id, created_at \
             FROM posts WHERE id = $1",
        )
        .bind(post_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|row| Post {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            url: row.get("url"),
            likes: row.get("likes"),
            user_id: row.get("user_id"),
            owner_username: None,
            owner_name: None,
            created_at: row.get("created_at"),
        }))
    }

    /// Persist a post owned by `owner_id`, defaulting likes to 0.
    /// Returns `None` when the owner no longer exists, which callers
    /// treat the same as an invalid token.
    pub async fn create(&self, owner_id: Uuid, input: NewPost) -> Result<Option<Post>> {
        let owner_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(owner_id)
                .fetch_one(self.db.pool())
                .await?;
        if !owner_exists {
            return Ok(None);
        }

        let row = sqlx::query(
            "INSERT INTO posts (title, author, url, likes, user_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, author, url, likes, user_id, created_at",
        )
        .bind(input.title)
        .bind(input.author)
        .bind(input.url)
        .bind(input.likes.unwrap_or(0))
        .bind(owner_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(Some(Post {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            url: row.get("url"),
            likes: row.get("likes"),
            user_id: row.get("user_id"),
            owner_username: None,
            owner_name: None,
            created_at: row.get("created_at"),
        }))
    }

    /// Load, merge and persist a partial update. `None` when the post
    /// does not exist.
    pub async fn update(&self, post_id: Uuid, input: PostUpdate) -> Result<Option<Post>> {
        let existing = match self.get(post_id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let merged = merge_update(&existing, input);

        let row = sqlx::query(
            "UPDATE posts SET title = $2, author = $3, url = $4, likes = $5 \
             WHERE id = $1 \
             RETURNING id, title, author, url, likes, user_id, created_at",
        )
        .bind(post_id)
        .bind(merged.title)
        .bind(merged.author)
        .bind(merged.url)
        .bind(merged.likes)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|row| Post {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            url: row.get("url"),
            likes: row.get("likes"),
            user_id: row.get("user_id"),
            owner_username: None,
            owner_name: None,
            created_at: row.get("created_at"),
        }))
    }

    /// Remove a post if and only if `requester_id` owns it.
    pub async fn delete(&self, post_id: Uuid, requester_id: Uuid) -> Result<Deletion> {
        let owner_id: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM posts WHERE id = $1")
                .bind(post_id)
                .fetch_optional(self.db.pool())
                .await?;

        let owner_id = match owner_id {
            Some(owner_id) => owner_id,
            None => return Ok(Deletion::NotFound),
        };
        if owner_id != requester_id {
            return Ok(Deletion::Forbidden);
        }

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(self.db.pool())
            .await?;

        Ok(Deletion::Deleted)
    }
}

/// Merged field values for a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

/// Field-by-field fallback: every field absent from the request keeps the
/// stored value. A supplied likes value always wins, so an update carrying
/// only likes changes nothing else.
pub fn merge_update(existing: &Post, input: PostUpdate) -> MergedPost {
    MergedPost {
        title: input.title.unwrap_or_else(|| existing.title.clone()),
        author: input.author.unwrap_or_else(|| existing.author.clone()),
        url: input.url.unwrap_or_else(|| existing.url.clone()),
        likes: input.likes.unwrap_or(existing.likes),
    }
}
