use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    chirps::{
        filter::{clean_body, is_too_long},
        repo_types::Chirp,
    },
    error::{AppError, AppResult},
    state::AppState,
};

#[instrument(skip(state, body))]
pub async fn create_chirp(state: &AppState, user_id: Uuid, body: &str) -> AppResult<Chirp> {
    if is_too_long(body) {
        warn!(len = body.chars().count(), "chirp too long");
        return Err(AppError::InvalidInput("Chirp is too long".into()));
    }
    let chirp = state.chirps.create(user_id, &clean_body(body)).await?;
    info!(chirp_id = %chirp.id, "chirp created");
    Ok(chirp)
}

pub async fn list_chirps(state: &AppState) -> AppResult<Vec<Chirp>> {
    Ok(state.chirps.list().await?)
}

/// A path segment that is not a UUID is reported the same as a missing chirp.
pub async fn get_chirp(state: &AppState, raw_id: &str) -> AppResult<Chirp> {
    let not_found = || AppError::NotFound("Chirp not found".into());
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
    state.chirps.get(id).await?.ok_or_else(not_found)
}
