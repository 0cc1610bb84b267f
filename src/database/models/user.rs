use sqlx::FromRow;

/// User credential record. `password` holds the bcrypt hash, never plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub username: String,
    pub password: String,
}
