use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    auth::{AuthStrategy, SESSION_COOKIE},
    error::AppError,
};

/// Rejects the request before it reaches a protected handler unless it
/// carries a live session cookie or a valid bearer token, depending on the
/// configured strategy. Accepted requests pass through untouched.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match &state.auth {
        AuthStrategy::None => {}
        AuthStrategy::Session(issuer) => {
            let jar = CookieJar::from_headers(req.headers());
            let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());
            issuer.authorize(token).await?;
        }
        AuthStrategy::Bearer(issuer) => {
            let header = req.headers().typed_get::<Authorization<Bearer>>();
            issuer.authorize(header.as_ref().map(|auth| auth.token()))?;
        }
    }

    Ok(next.run(req).await)
}
