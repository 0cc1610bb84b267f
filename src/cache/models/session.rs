use serde::{Deserialize, Serialize};

/// Server-side session state bound to one opaque token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CachedSession {
    pub username: String,
    pub expires_at: i64, // Unix timestamp
}

impl CachedSession {
    pub fn new(username: &str, ttl_secs: u64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            username: username.to_string(),
            expires_at: now + ttl_secs as i64,
        }
    }

    pub fn remaining_secs(&self) -> i64 {
        self.expires_at - chrono::Utc::now().timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs() <= 0
    }
}
