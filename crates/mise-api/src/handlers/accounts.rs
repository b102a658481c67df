//! Signup and login. Both answer with a fresh bearer token.

use axum::{extract::State, response::IntoResponse};
use tracing::info;

use mise_core::credentials::{
    generate_token, hash_password, hash_token, verify_against_dummy, verify_password,
};
use mise_core::{Credentials, Error};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::{created, ok, TokenIssued};
use crate::AppState;

/// Run argon2 off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> mise_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(Error::Internal(e.to_string())))?
        .map_err(ApiError::from)
}

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = body.validated()?;
    let password = credentials.password;
    let password_hash = blocking(move || hash_password(&password)).await?;

    let token = generate_token();
    let user = state
        .db
        .users
        .create(&credentials.username, &password_hash, &hash_token(&token))
        .await?;

    info!(user_id = user.id, "User signed up");
    Ok(created(TokenIssued { token }))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let rejected = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .db
        .users
        .get_by_username(body.username.trim())
        .await?;

    // Unknown usernames still pay for an argon2 verification.
    let password = body.password;
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let verified = blocking(move || match stored {
        Some(hash) => verify_password(&password, &hash),
        None => verify_against_dummy(&password),
    })
    .await?;
    let user = match user {
        Some(user) if verified => user,
        _ => return Err(rejected()),
    };

    let token = generate_token();
    state.db.users.issue_token(user.id, &hash_token(&token)).await?;

    info!(user_id = user.id, "User logged in");
    Ok(ok(TokenIssued { token }))
}
