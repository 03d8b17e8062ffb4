use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    users::{repo::UserWrite, repo_types::User},
};

/// Emails shorter than this are rejected before anything else.
pub const MIN_EMAIL_LEN: usize = 5;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims the email and applies the length check shared with login.
pub fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    if email.len() < MIN_EMAIL_LEN {
        return Err(AppError::InvalidInput("Email is too short".into()));
    }
    Ok(email.to_string())
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already registered".into())
}

fn validate(email: &str, password: &str) -> AppResult<String> {
    let email = normalize_email(email)?;
    if !is_valid_email(&email) {
        return Err(AppError::InvalidInput("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(AppError::InvalidInput("Password is required".into()));
    }
    Ok(email)
}

#[instrument(skip(state, password))]
pub async fn create_user(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let email = validate(email, password)?;

    if state.users.get_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(email_taken());
    }

    let hash = state.hasher.hash_blocking(password.to_owned()).await?;
    // A concurrent signup can still win between the check and the insert.
    let UserWrite::Saved(user) = state.users.create(&email, &hash).await? else {
        warn!(email = %email, "email registered concurrently");
        return Err(email_taken());
    };
    info!(user_id = %user.id, "user created");
    Ok(user)
}

#[instrument(skip(state, password))]
pub async fn update_user(
    state: &AppState,
    user_id: Uuid,
    email: &str,
    password: &str,
) -> AppResult<User> {
    let email = validate(email, password)?;

    if let Some(other) = state.users.get_by_email(&email).await? {
        if other.id != user_id {
            warn!(user_id = %user_id, "email taken by another user");
            return Err(email_taken());
        }
    }

    let hash = state.hasher.hash_blocking(password.to_owned()).await?;
    let user = match state.users.update(user_id, &email, &hash).await? {
        Some(UserWrite::Saved(user)) => user,
        Some(UserWrite::EmailTaken) => {
            warn!(user_id = %user_id, "email taken concurrently");
            return Err(email_taken());
        }
        None => {
            warn!(user_id = %user_id, "token subject no longer exists");
            return Err(AppError::Unauthorized);
        }
    };
    info!(user_id = %user.id, "user updated");
    Ok(user)
}
