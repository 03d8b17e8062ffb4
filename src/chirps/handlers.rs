use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    chirps::{
        dto::{ChirpResponse, CreateChirpRequest},
        services,
    },
    error::{AppJson, AppResult},
    state::AppState,
};

pub fn chirp_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chirps", get(list_chirps).post(create_chirp))
        .route("/api/chirps/:chirp_id", get(get_chirp))
}

#[instrument(skip(state, payload))]
pub async fn create_chirp(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateChirpRequest>,
) -> AppResult<(StatusCode, Json<ChirpResponse>)> {
    let chirp = services::create_chirp(&state, user_id, &payload.body).await?;
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

#[instrument(skip(state))]
pub async fn list_chirps(State(state): State<AppState>) -> AppResult<Json<Vec<ChirpResponse>>> {
    let chirps = services::list_chirps(&state).await?;
    Ok(Json(chirps.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> AppResult<Json<ChirpResponse>> {
    let chirp = services::get_chirp(&state, &chirp_id).await?;
    Ok(Json(chirp.into()))
}
