use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ChirpData;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Post a chirp as the authenticated user.
///
/// The author is always the token subject; any author field in the body is ignored.
pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateChirpRequest>, ApiError>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let body = ChirpBody::new(body.body).map_err(ChirpError::from)?;
    let command = CreateChirpCommand::new(authenticated.user_id, body);

    state
        .chirp_service
        .create_chirp(command)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}
