use auth::AuthError;
use auth::Rejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpError;
use crate::user::errors::UserError;

pub mod chirps;
pub mod create_user;
pub mod login;
pub mod reset;

/// Message shown for every rejected bearer credential, whatever the reason.
pub const UNAUTHORIZED_MESSAGE: &str = "invalid or missing bearer token";

/// Message shown for every failed login, whatever the reason.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "incorrect email or password";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

/// Malformed or mistyped request bodies keep the `{"error": ..}` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(message),
            _ => ApiError::BadRequest(message),
        }
    }
}

/// Collapse every authentication failure into one client-visible outcome.
///
/// The specific reason only reaches the logs.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err.rejection() {
            Rejection::Unauthorized => {
                tracing::warn!(reason = %err, "Authentication rejected");
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            Rejection::Internal => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByEmail(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::InvalidBody(ChirpBodyError::TooLong { .. }) => {
                ApiError::BadRequest("Chirp is too long".to_string())
            }
            ChirpError::InvalidChirpId(_) | ChirpError::NotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ChirpError::AuthorNotFound(_) => {
                tracing::warn!(reason = %err, "Token subject has no account");
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            ChirpError::DatabaseError(_) | ChirpError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}
