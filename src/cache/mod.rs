//! Key-value side of the service: the recipe collection snapshot and the
//! server-side session store. Both have a redis and an in-memory backend.

use async_trait::async_trait;

use crate::database::Recipe;
use crate::error::AppResult;

pub mod keys;
pub mod memory;
pub mod models;
pub mod operations;

pub use memory::{MemoryRecipeCache, MemorySessionStore};
pub use models::CachedSession;
pub use operations::{RedisRecipeCache, RedisSessionStore};

/// Read-through cache for the full recipe collection under one fixed key.
#[async_trait]
pub trait RecipeCache: Send + Sync {
    /// `None` is a miss; the caller must consult the store.
    async fn get(&self) -> AppResult<Option<Vec<Recipe>>>;
    async fn put(&self, recipes: &[Recipe]) -> AppResult<()>;
    async fn invalidate(&self) -> AppResult<()>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, token: &str, session: &CachedSession) -> AppResult<()>;
    /// Expired or unknown tokens yield `None`.
    async fn load(&self, token: &str) -> AppResult<Option<CachedSession>>;
    async fn remove(&self, token: &str) -> AppResult<()>;
}
