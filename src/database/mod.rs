//! Document store adapters for the `users` and `recipes` collections.
//!
//! Each collection sits behind a trait so the service can run against
//! postgres in production and against process memory in tests or demos.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::PasswordHasher;

pub mod memory;
pub mod models;
pub mod operations;

pub use memory::{MemoryCredentialStore, MemoryRecipeRepository};
pub use models::{Recipe, RecipeFields, UserEntity};
pub use operations::{PgCredentialStore, PgRecipeRepository};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserEntity>>;

    /// Stores a new user and returns its id (the username).
    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<String>;

    /// Returns the user only when both the username and the password match.
    async fn find_user(
        &self,
        username: &str,
        password: &str,
        hasher: &PasswordHasher,
    ) -> AppResult<Option<UserEntity>> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        if hasher.verify(password, &user.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn insert(&self, recipe: &Recipe) -> AppResult<String>;

    /// All recipes, in the store's natural order (not guaranteed).
    async fn find_all(&self) -> AppResult<Vec<Recipe>>;

    /// Recipes whose tag list contains `tag` exactly.
    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Recipe>>;

    /// Replaces the four mutable fields. Returns the number of matched
    /// records; an unknown id yields `Ok(0)`, not an error.
    async fn update(&self, id: &str, fields: &RecipeFields) -> AppResult<u64>;

    /// Returns the number of deleted records; an unknown id yields `Ok(0)`.
    async fn delete(&self, id: &str) -> AppResult<u64>;
}

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password TEXT NOT NULL
)
"#;

const CREATE_RECIPES: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    tags TEXT[] NOT NULL DEFAULT '{}',
    ingredients TEXT[] NOT NULL DEFAULT '{}',
    instructions TEXT[] NOT NULL DEFAULT '{}',
    published_at TIMESTAMPTZ NOT NULL
)
"#;

/// Opens the postgres pool and makes sure both collections exist.
pub async fn connect_postgres(url: &str, config: &Config) -> AppResult<PgPool> {
    let mut options = PgConnectOptions::from_str(url)?.application_name("recipes_api");
    if let Some(name) = &config.database_name {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await?;

    pool.execute(CREATE_USERS).await?;
    pool.execute(CREATE_RECIPES).await?;
    tracing::info!("Connected to postgres, schema ready");

    Ok(pool)
}

/// Inserts the configured seed accounts, skipping ones that already exist.
pub async fn seed_users(
    store: &dyn CredentialStore,
    hasher: &PasswordHasher,
    users: &[(String, String)],
) -> AppResult<()> {
    for (username, password) in users {
        let hash = hasher.hash(password)?;
        match store.insert_user(username, &hash).await {
            Ok(_) => tracing::info!("Seeded user {}", username),
            Err(AppError::AlreadyExists(_)) => {
                tracing::debug!("Seed user {} already present", username)
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_user_requires_matching_password() {
        let hasher = PasswordHasher::new(4);
        let store = MemoryCredentialStore::default();
        seed_users(&store, &hasher, &[("admin".into(), "correct".into())])
            .await
            .unwrap();

        assert!(store.find_user("admin", "correct", &hasher).await.unwrap().is_some());
        assert!(store.find_user("admin", "wrong", &hasher).await.unwrap().is_none());
        assert!(store.find_user("Admin", "correct", &hasher).await.unwrap().is_none());
        assert!(store.find_user("nobody", "correct", &hasher).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeding_twice_keeps_the_first_password() {
        let hasher = PasswordHasher::new(4);
        let store = MemoryCredentialStore::default();
        seed_users(&store, &hasher, &[("admin".into(), "first".into())])
            .await
            .unwrap();
        seed_users(&store, &hasher, &[("admin".into(), "second".into())])
            .await
            .unwrap();

        assert!(store.find_user("admin", "first", &hasher).await.unwrap().is_some());
        assert!(store.find_user("admin", "second", &hasher).await.unwrap().is_none());
    }
}
