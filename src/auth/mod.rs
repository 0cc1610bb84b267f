//! Sign-in and request authorization. One strategy is active per deployment.

mod bearer;
mod session;

pub use bearer::BearerIssuer;
pub use session::SessionIssuer;

use crate::config::AuthMode;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "recipes_session";

#[derive(Clone)]
pub enum AuthStrategy {
    /// Every route is open.
    None,
    Session(SessionIssuer),
    Bearer(BearerIssuer),
}

impl AuthStrategy {
    pub fn mode(&self) -> AuthMode {
        match self {
            AuthStrategy::None => AuthMode::None,
            AuthStrategy::Session(_) => AuthMode::Session,
            AuthStrategy::Bearer(_) => AuthMode::Bearer,
        }
    }
}
