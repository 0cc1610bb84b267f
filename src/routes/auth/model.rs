use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Bearer sign-in result.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub expires: DateTime<Utc>,
}
