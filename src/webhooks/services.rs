use tracing::{debug, info, instrument, warn};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    webhooks::dto::{PolkaEvent, USER_UPGRADED},
};

/// Applies a Polka billing event. Events other than an upgrade are ignored.
#[instrument(skip(state, event), fields(event = %event.event))]
pub async fn handle_polka_event(state: &AppState, event: PolkaEvent) -> AppResult<()> {
    if event.event != USER_UPGRADED {
        debug!("ignoring polka event");
        return Ok(());
    }
    let user_id = event.data.user_id;
    if !state.users.set_chirpy_red(user_id, true).await? {
        warn!(user_id = %user_id, "upgrade for unknown user");
        return Err(AppError::NotFound("User not found".into()));
    }
    info!(user_id = %user_id, "user upgraded to chirpy red");
    Ok(())
}
