use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::RecipeCache;
use crate::cache::keys::RECIPES_KEY;
use crate::database::Recipe;
use crate::error::AppResult;

/// Recipe collection snapshot stored as JSON in redis.
#[derive(Clone)]
pub struct RedisRecipeCache {
    redis: Arc<RedisClient>,
}

impl RedisRecipeCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RecipeCache for RedisRecipeCache {
    async fn get(&self) -> AppResult<Option<Vec<Recipe>>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(RECIPES_KEY).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, recipes: &[Recipe]) -> AppResult<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(recipes)?;
        // no expiry: the entry lives until the next write invalidates it
        let _: () = conn.set(RECIPES_KEY, json).await?;

        Ok(())
    }

    async fn invalidate(&self) -> AppResult<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let _: () = conn.del(RECIPES_KEY).await?;

        Ok(())
    }
}
