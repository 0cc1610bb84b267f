use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::CredentialStore;
use crate::database::models::UserEntity;
use crate::error::{AppError, AppResult};

/// `users` collection on postgres.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserEntity>> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<String> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(username.to_string()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::AlreadyExists(username.to_string()))
            }
            Err(e) => {
                tracing::error!("Failed to insert user {}: {:?}", username, e);
                Err(e.into())
            }
        }
    }
}
