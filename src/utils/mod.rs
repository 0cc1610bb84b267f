use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Salted one-way password hashing.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password.as_bytes(), self.cost)
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password.as_bytes(), hash)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
}

/// Signs and verifies bearer tokens with the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl.as_secs() as i64),
        }
    }

    pub fn generate_token(
        &self,
        username: &str,
    ) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
        let expires = Utc::now() + self.ttl;
        let claims = Claims {
            username: username.to_string(),
            exp: expires.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok((token, expires))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding, &validation)?;
        // decode accepts exp == now; a token is only valid strictly before exp
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(ErrorKind::ExpiredSignature.into());
        }
        Ok(token_data.claims)
    }
}

/// Mints a fresh opaque session token.
pub fn generate_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Hex SHA-256 digest of a session token, used as its storage key.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_but_verifiable() {
        let hasher = PasswordHasher::new(4);
        let first = hasher.hash("correct horse").unwrap();
        let second = hasher.hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert_ne!(first, "correct horse");
        assert!(hasher.verify("correct horse", &first).unwrap());
        assert!(!hasher.verify("wrong horse", &second).unwrap());
    }

    #[test]
    fn issued_token_round_trips_username() {
        let keys = JwtKeys::new("test-secret", std::time::Duration::from_secs(600));
        let (token, expires) = keys.generate_token("admin").unwrap();

        let claims = keys.verify_token(&token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.exp, expires.timestamp());
        assert!(expires > Utc::now());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let ours = JwtKeys::new("ours", std::time::Duration::from_secs(600));
        let theirs = JwtKeys::new("theirs", std::time::Duration::from_secs(600));
        let (token, _) = theirs.generate_token("admin").unwrap();

        assert!(ours.verify_token(&token).is_err());
        assert!(ours.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("secret", std::time::Duration::from_secs(600));
        let claims = Claims {
            username: "admin".into(),
            exp: Utc::now().timestamp() - 5,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(keys.verify_token(&token).is_err());
    }

    #[test]
    fn token_expiring_this_second_is_rejected() {
        let keys = JwtKeys::new("secret", std::time::Duration::from_secs(600));
        let claims = Claims {
            username: "admin".into(),
            exp: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let err = keys.verify_token(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn session_tokens_are_unique_and_digest_is_stable() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);

        assert_eq!(token_digest(&a), token_digest(&a));
        assert_ne!(token_digest(&a), token_digest(&b));
        assert_eq!(token_digest(&a).len(), 64);
    }
}
