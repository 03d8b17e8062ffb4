//! Login, refresh and revoke.
//!
//! Failure classes are coarse: a caller learns only "bad
//! credentials" on login and "unauthorized" on token use.

use axum::http::HeaderMap;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        bearer::extract_bearer,
        dto::{LoginRequest, LoginResponse},
        repo::create_refresh_token,
        repo_types::RefreshToken,
    },
    error::{AppError, AppResult},
    state::AppState,
    users::services::normalize_email,
};

#[instrument(skip(state, payload))]
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let email = normalize_email(&payload.email)?;

    let Some(user) = state.users.get_by_email(&email).await? else {
        state.hasher.verify_dummy_blocking(payload.password).await?;
        warn!("login for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let ok = state
        .hasher
        .verify_blocking(payload.password, user.hashed_password.clone())
        .await?;
    if !ok {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let now = state.now();
    let ttl = state.keys.effective_ttl(payload.expires_in_seconds);
    let token = state.keys.issue(user.id, now, ttl)?;
    let refresh_token = create_refresh_token(
        state.refresh_tokens.as_ref(),
        user.id,
        now,
        state.config.jwt.refresh_ttl(),
    )
    .await?;

    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    })
}

/// Resolves the user behind a bearer access token.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<Uuid> {
    let token = extract_bearer(headers)?;
    state.keys.validate(token, state.now()).map_err(|e| {
        debug!(error = %e, "access token rejected");
        AppError::Unauthorized
    })
}

/// Bearer refresh token that exists, is not revoked and has not expired.
async fn usable_refresh_token(state: &AppState, headers: &HeaderMap) -> AppResult<RefreshToken> {
    let presented = extract_bearer(headers)?;
    let now = state.now();
    match state.refresh_tokens.lookup(presented).await? {
        Some(record) if record.is_usable_at(now) => Ok(record),
        Some(record) => {
            debug!(user_id = %record.user_id, "refresh token revoked or expired");
            Err(AppError::Unauthorized)
        }
        None => {
            debug!("refresh token unknown");
            Err(AppError::Unauthorized)
        }
    }
}

#[instrument(skip_all)]
pub async fn refresh(state: &AppState, headers: &HeaderMap) -> AppResult<String> {
    let record = usable_refresh_token(state, headers).await?;
    let token = state
        .keys
        .issue(record.user_id, state.now(), state.keys.access_ttl())?;
    info!(user_id = %record.user_id, "access token refreshed");
    Ok(token)
}

#[instrument(skip_all)]
pub async fn revoke(state: &AppState, headers: &HeaderMap) -> AppResult<()> {
    let record = usable_refresh_token(state, headers).await?;
    if !state.refresh_tokens.revoke(&record.token, state.now()).await? {
        // Lost to a concurrent revoke.
        debug!(user_id = %record.user_id, "refresh token already revoked");
        return Err(AppError::Unauthorized);
    }
    info!(user_id = %record.user_id, "refresh token revoked");
    Ok(())
}
