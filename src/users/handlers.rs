use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{AppJson, AppResult},
    state::AppState,
    users::{
        dto::{PublicUser, UserCredentials},
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users", post(create_user).put(update_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserCredentials>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = services::create_user(&state, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<UserCredentials>,
) -> AppResult<Json<PublicUser>> {
    let user = services::update_user(&state, user_id, &payload.email, &payload.password).await?;
    Ok(Json(user.into()))
}
