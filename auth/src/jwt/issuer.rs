use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;

/// Issuer name stamped into every session token.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Mints signed, time-bounded session tokens.
///
/// Tokens are compact HS256 JWTs. The signing secret is injected at
/// construction and never read from ambient state.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret, identical to the validator's
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Override the issuer name.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Issue a token for a user, starting now.
    ///
    /// The lifetime is trusted as given; clamping is the caller's job.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, user_id: &Uuid, lifetime: Duration) -> Result<String, TokenError> {
        self.issue_at(user_id, lifetime, Utc::now())
    }

    /// Issue a token with an explicit issuance instant.
    ///
    /// Deterministic for identical inputs.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        user_id: &Uuid,
        lifetime: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(&self.issuer, user_id, issued_at, lifetime);
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
