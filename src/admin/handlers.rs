use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/healthz", get(healthz))
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset))
}

pub async fn healthz() -> &'static str {
    "OK"
}

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>",
        state.hits.get()
    ))
}

/// Dev only: zeroes the hit counter and deletes every user.
#[instrument(skip(state))]
pub async fn reset(State(state): State<AppState>) -> AppResult<StatusCode> {
    if !state.config.is_dev() {
        warn!(platform = %state.config.platform, "reset refused");
        return Err(AppError::Forbidden);
    }
    state.hits.reset();
    let deleted = state.users.delete_all().await?;
    info!(deleted, "state reset");
    Ok(StatusCode::OK)
}
