use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::SessionStore;
use crate::cache::keys::session_key;
use crate::cache::models::CachedSession;
use crate::error::{AppError, AppResult};

/// Sessions in redis; expiry is left to the key TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, token: &str, session: &CachedSession) -> AppResult<()> {
        let ttl = session.remaining_secs();
        if ttl <= 0 {
            return Err(AppError::ExpiredSession);
        }

        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(session)?;
        let _: () = conn.set_ex(session_key(token), json, ttl as u64).await?;

        Ok(())
    }

    async fn load(&self, token: &str) -> AppResult<Option<CachedSession>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(session_key(token)).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, token: &str) -> AppResult<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let _: () = conn.del(session_key(token)).await?;

        Ok(())
    }
}
