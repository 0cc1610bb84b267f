use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::database::CredentialStore;
use crate::error::{AppError, AppResult};
use crate::utils::{Claims, JwtKeys, PasswordHasher};

/// Stateless signed tokens. They cannot be revoked before they expire.
#[derive(Clone)]
pub struct BearerIssuer {
    credentials: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    keys: JwtKeys,
}

impl BearerIssuer {
    pub fn new(credentials: Arc<dyn CredentialStore>, hasher: PasswordHasher, keys: JwtKeys) -> Self {
        Self {
            credentials,
            hasher,
            keys,
        }
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> AppResult<(String, DateTime<Utc>)> {
        let user = self
            .credentials
            .find_user(username, password, &self.hasher)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let issued = self.keys.generate_token(&user.username)?;
        tracing::info!("Issued bearer token for {}", user.username);
        Ok(issued)
    }

    pub fn authorize(&self, token: Option<&str>) -> AppResult<Claims> {
        let token = token.ok_or(AppError::Unauthorized)?;
        self.keys.verify_token(token).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::database::{MemoryCredentialStore, seed_users};

    async fn issuer(secret: &str) -> BearerIssuer {
        let hasher = PasswordHasher::new(4);
        let credentials = Arc::new(MemoryCredentialStore::default());
        seed_users(credentials.as_ref(), &hasher, &[("admin".into(), "correct".into())])
            .await
            .unwrap();
        BearerIssuer::new(credentials, hasher, JwtKeys::new(secret, Duration::from_secs(600)))
    }

    #[tokio::test]
    async fn sign_in_issues_verifiable_token() {
        let issuer = issuer("secret").await;
        let (token, expires) = issuer.sign_in("admin", "correct").await.unwrap();

        assert!(expires > Utc::now());
        assert_eq!(issuer.authorize(Some(&token)).unwrap().username, "admin");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let issuer = issuer("secret").await;
        assert!(matches!(
            issuer.sign_in("admin", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn foreign_or_missing_tokens_are_unauthorized() {
        let ours = issuer("ours").await;
        let theirs = issuer("theirs").await;
        let (token, _) = theirs.sign_in("admin", "correct").await.unwrap();

        assert!(matches!(ours.authorize(Some(&token)), Err(AppError::Unauthorized)));
        assert!(matches!(ours.authorize(None), Err(AppError::Unauthorized)));
        assert!(matches!(ours.authorize(Some("garbage")), Err(AppError::Unauthorized)));
    }
}
