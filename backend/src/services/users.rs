//! Farmer accounts and their preferred reply language

use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use shared::{Locale, User};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::external::UserDirectory;

/// User service over the `users` table
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    pref_lang: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            username: row.username,
            pref_lang: row.pref_lang,
            created_at: row.created_at,
        }
    }
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a user. Returns false when the username is taken.
    pub async fn signup(&self, username: &str, password: &str, pref_lang: Locale) -> AppResult<bool> {
        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, pref_lang)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(pref_lang.code())
        .execute(&self.db)
        .await?;

        let created = result.rows_affected() == 1;
        if created {
            tracing::info!(username, "registered user");
        }
        Ok(created)
    }

    /// Check a username and password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        let stored = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        let Some(password_hash) = stored else {
            return Ok(false);
        };

        verify(password, &password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }

    /// Update the preferred language. Returns false when the user does not exist.
    pub async fn set_language(&self, username: &str, locale: Locale) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET pref_lang = $2 WHERE username = $1")
            .bind(username)
            .bind(locale.code())
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, pref_lang, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserDirectory for UserService {
    async fn lookup_user_locale(&self, username: &str) -> String {
        match self.find_user(username).await {
            Ok(Some(user)) => user.locale().code().to_string(),
            Ok(None) => Locale::PRIMARY_CODE.to_string(),
            Err(e) => {
                tracing::warn!(username, error = %e, "language lookup failed, using default");
                Locale::PRIMARY_CODE.to_string()
            }
        }
    }
}
