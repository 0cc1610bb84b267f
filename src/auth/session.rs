use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CachedSession, SessionStore};
use crate::database::CredentialStore;
use crate::error::{AppError, AppResult};
use crate::utils::{PasswordHasher, generate_session_token};

/// Opaque-token sessions. The token travels in a cookie; the username it is
/// bound to lives server-side in the session store.
#[derive(Clone)]
pub struct SessionIssuer {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: PasswordHasher,
    ttl_secs: u64,
}

impl SessionIssuer {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
        ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            sessions,
            hasher,
            ttl_secs: ttl.as_secs(),
        }
    }

    /// Checks the credentials and opens a new session, returning its token.
    /// A session the caller already held is discarded.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
        previous: Option<&str>,
    ) -> AppResult<String> {
        let user = self
            .credentials
            .find_user(username, password, &self.hasher)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if let Some(previous) = previous {
            if let Err(e) = self.sessions.remove(previous).await {
                tracing::warn!("Failed to drop previous session on sign in: {}", e);
            }
        }

        let token = generate_session_token();
        self.sessions
            .save(&token, &CachedSession::new(&user.username, self.ttl_secs))
            .await?;

        tracing::info!("User {} signed in", user.username);
        Ok(token)
    }

    /// Rotates the token of an active session. The old token stops working.
    pub async fn refresh(&self, token: Option<&str>) -> AppResult<String> {
        let token = token.ok_or(AppError::InvalidSession)?;
        let session = self
            .sessions
            .load(token)
            .await?
            .ok_or(AppError::InvalidSession)?;

        self.sessions.remove(token).await?;

        let rotated = generate_session_token();
        self.sessions
            .save(&rotated, &CachedSession::new(&session.username, self.ttl_secs))
            .await?;

        tracing::debug!("Rotated session token for {}", session.username);
        Ok(rotated)
    }

    /// Always succeeds; a store failure only leaves the entry to expire.
    pub async fn sign_out(&self, token: Option<&str>) {
        if let Some(token) = token {
            if let Err(e) = self.sessions.remove(token).await {
                tracing::warn!("Failed to remove session on sign out: {}", e);
            }
        }
    }

    pub async fn authorize(&self, token: Option<&str>) -> AppResult<CachedSession> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(AppError::Forbidden);
        };

        self.sessions.load(token).await?.ok_or(AppError::Forbidden)
    }
}
