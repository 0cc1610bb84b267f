use crate::utils::token_digest;

/// Single key holding the serialized snapshot of every recipe.
pub const RECIPES_KEY: &str = "recipes";

/// Session key prefix
const SESSION_PREFIX: &str = "session:";

/// Sessions are stored under the token digest so the raw cookie value
/// never appears in the key space.
pub fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_PREFIX, token_digest(token))
}
