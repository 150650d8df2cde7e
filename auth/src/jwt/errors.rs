use thiserror::Error;

/// Error type for session token operations.
///
/// Validation variants are kept distinct for diagnostics only; callers
/// facing clients collapse them into a single unauthorized outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer is not accepted: {0}")]
    WrongIssuer(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is not a valid user id: {0}")]
    MalformedSubject(String),
}
