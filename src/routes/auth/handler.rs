use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    AppState,
    auth::{AuthStrategy, SESSION_COOKIE, SessionIssuer},
    common::MessageResponse,
    config::Config,
    error::{AppError, AppResult},
};

use super::model::{SignInRequest, SignInResponse};

fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.session_cookie_secure)
        .build()
}

fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value())
}

fn session_issuer(state: &AppState) -> AppResult<&SessionIssuer> {
    match &state.auth {
        AuthStrategy::Session(issuer) => Ok(issuer),
        _ => Err(AppError::NotFound("session".into())),
    }
}

#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    match &state.auth {
        AuthStrategy::Session(issuer) => {
            let token = issuer
                .sign_in(&req.username, &req.password, session_token(&jar))
                .await?;
            let jar = jar.add(session_cookie(token, &state.config));
            Ok((jar, Json(MessageResponse::new("User signed in"))).into_response())
        }
        AuthStrategy::Bearer(issuer) => {
            let (token, expires) = issuer.sign_in(&req.username, &req.password).await?;
            Ok(Json(SignInResponse { token, expires }).into_response())
        }
        AuthStrategy::None => Err(AppError::NotFound("sign in".into())),
    }
}

#[axum::debug_handler]
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let issuer = session_issuer(&state)?;
    let token = issuer.refresh(session_token(&jar)).await?;

    let jar = jar.add(session_cookie(token, &state.config));
    Ok((jar, Json(MessageResponse::new("New session issued"))).into_response())
}

#[axum::debug_handler]
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let issuer = session_issuer(&state)?;
    issuer.sign_out(session_token(&jar)).await;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Json(MessageResponse::new("Signed out..."))).into_response())
}
