use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::Row;
use uuid::Uuid;

use crate::app::tokens::TokenService;
use crate::domain::user::User;
use crate::infra::db::Db;

/// Outcome of a successful login: the issued token plus the identity
/// fields echoed back to the client.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    db: Db,
}

impl AuthService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create an account. Returns `None` when the username is already
    /// taken; the unique constraint is the source of truth.
    pub async fn register(
        &self,
        username: &str,
        name: Option<String>,
        password: &str,
    ) -> Result<Option<User>> {
        let password_hash = hash_password(password)?;

        let row = sqlx::query(
            "INSERT INTO users (username, name, password_hash) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (username) DO NOTHING \
             RETURNING id, username, name, created_at",
        )
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            name: row.get("name"),
            created_at: row.get("created_at"),
        }))
    }

    /// Check credentials and issue a token. `None` covers both unknown
    /// usernames and wrong passwords.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        tokens: &TokenService,
    ) -> Result<Option<LoginSession>> {
        let row = sqlx::query(
            "SELECT id, username, name, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let password_hash: String = row.get("password_hash");
        if !verify_password(password, &password_hash)? {
            return Ok(None);
        }

        let user_id: Uuid = row.get("id");
        let token = tokens.issue(user_id)?;

        Ok(Some(LoginSession {
            token,
            username: row.get("username"),
            name: row.get("name"),
        }))
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {}", err))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| anyhow!("failed to parse password hash: {}", err))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
