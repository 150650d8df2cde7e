use std::sync::Arc;

use auth::AuthError;
use auth::PasswordError;
use auth::Rejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequestBody>, ApiError>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let LoginRequestBody {
        email,
        password,
        expires_in_seconds,
    } = body;

    let email = EmailAddress::new(email).map_err(|_| invalid_credentials())?;

    let gateway = Arc::clone(&state.gateway);

    let user = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            // Pay the same hashing cost as a real account before refusing
            let err = tokio::task::spawn_blocking(move || {
                gateway.reject_unknown_account(&password)
            })
            .await
            .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?;

            return Err(login_failure(err));
        }
        Err(e) => return Err(ApiError::from(e)),
    };

    let lifetime = state.lifetime_policy.clamp(expires_in_seconds);
    let stored_hash = user.password_hash.clone();
    let user_id = user.id;

    // Argon2 verification is CPU bound
    let token = tokio::task::spawn_blocking(move || {
        gateway.login(&password, &stored_hash, user_id.as_uuid(), lifetime)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?
    .map_err(login_failure)?;

    tracing::info!(user_id = %user.id, lifetime_seconds = lifetime.num_seconds(), "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&user).into(),
            token,
        },
    ))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
}

fn login_failure(err: AuthError) -> ApiError {
    match err.rejection() {
        Rejection::Unauthorized => {
            if let AuthError::Password(PasswordError::MalformedHash(ref detail)) = err {
                tracing::error!(detail = %detail, "Stored password hash is unusable");
            } else {
                tracing::warn!(reason = %err, "Login rejected");
            }
            invalid_credentials()
        }
        Rejection::Internal => ApiError::from(err),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
}
