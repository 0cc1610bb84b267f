use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::keys::session_key;
use crate::cache::models::CachedSession;
use crate::cache::{RecipeCache, SessionStore};
use crate::database::Recipe;
use crate::error::{AppError, AppResult};

/// In-process recipe snapshot, kept serialized like the redis entry.
#[derive(Default)]
pub struct MemoryRecipeCache {
    entry: RwLock<Option<String>>,
}

#[async_trait]
impl RecipeCache for MemoryRecipeCache {
    async fn get(&self) -> AppResult<Option<Vec<Recipe>>> {
        match self.entry.read().await.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, recipes: &[Recipe]) -> AppResult<()> {
        let json = serde_json::to_string(recipes)?;
        *self.entry.write().await = Some(json);
        Ok(())
    }

    async fn invalidate(&self) -> AppResult<()> {
        self.entry.write().await.take();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, CachedSession>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, token: &str, session: &CachedSession) -> AppResult<()> {
        if session.is_expired() {
            return Err(AppError::ExpiredSession);
        }

        self.sessions
            .write()
            .await
            .insert(session_key(token), session.clone());
        Ok(())
    }

    async fn load(&self, token: &str) -> AppResult<Option<CachedSession>> {
        let key = session_key(token);
        let mut sessions = self.sessions.write().await;
        let expired = match sessions.get(&key) {
            Some(session) if !session.is_expired() => return Ok(Some(session.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            sessions.remove(&key);
        }
        Ok(None)
    }

    async fn remove(&self, token: &str) -> AppResult<()> {
        self.sessions.write().await.remove(&session_key(token));
        Ok(())
    }
}
