use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::api_key::check_api_key,
    error::{AppError, AppResult},
    state::AppState,
    webhooks::{dto::PolkaEvent, services},
};

pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/api/polka/webhooks", post(polka_webhook))
}

/// The API key is checked before the body is parsed.
#[instrument(skip_all)]
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    check_api_key(&headers, &state.config.polka_key)?;
    let event: PolkaEvent = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected webhook body");
        AppError::InvalidInput("Invalid request body".into())
    })?;
    services::handle_polka_event(&state, event).await?;
    Ok(StatusCode::NO_CONTENT)
}
