use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("no active session")]
    InvalidSession,
    #[error("missing or invalid bearer token")]
    Unauthorized,
    #[error("not logged in")]
    Forbidden,
    #[error("session expired before it was stored")]
    ExpiredSession,
    #[error("{0} not found")]
    NotFound(String),
    #[error("user {0} already exists")]
    AlreadyExists(String),
    #[error("document store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".into(),
            ),
            AppError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, "Invalid session cookie".into())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Not logged".into()),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, "User already exists".into()),
            AppError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Document store unavailable".into(),
            ),
            AppError::Cache(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cache unavailable".into()),
            AppError::ExpiredSession
            | AppError::Serialization(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message,
        });

        (status, body).into_response()
    }
}
