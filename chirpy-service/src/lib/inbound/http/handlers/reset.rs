use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Wipe every user and chirp. Only available on the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<(StatusCode, &'static str), ApiError> {
    if !state.allow_reset {
        tracing::warn!("Reset attempted outside dev environment");
        return Err(ApiError::Forbidden(
            "reset is only allowed in dev environment".to_string(),
        ));
    }

    let deleted = state.user_service.delete_all_users().await?;
    tracing::info!(deleted_users = deleted, "Store reset");

    Ok((StatusCode::OK, "Reset OK"))
}
