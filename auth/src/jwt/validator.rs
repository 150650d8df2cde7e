use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;
use super::issuer::DEFAULT_ISSUER;

/// Verifies session tokens and recovers the authenticated user id.
///
/// Stateless: the outcome depends only on the token, the secret held here,
/// and the instant passed in. Checks run in a fixed order: structure,
/// signature, issuer, expiry, subject.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenValidator {
    /// Create a new token validator with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret, identical to the issuer's
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller-supplied clock, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Override the accepted issuer name.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// Any `TokenError` validation variant; see [`TokenValidator::validate_at`]
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token at an explicit instant.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    /// * `now` - Instant the expiry check runs against
    ///
    /// # Returns
    /// The user id carried in the `sub` claim
    ///
    /// # Errors
    /// * `Malformed` - Not a decodable HS256 JWT with the required claims
    /// * `InvalidSignature` - Signature does not match this secret
    /// * `WrongIssuer` - `iss` is not the accepted issuer
    /// * `Expired` - `now` is at or past `exp`
    /// * `MalformedSubject` - `sub` is not a UUID
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        let claims = self.verified_claims_at(token, now)?;

        Uuid::parse_str(&claims.sub).map_err(|e| TokenError::MalformedSubject(e.to_string()))
    }

    /// Verify signature, issuer and expiry and return the raw claims.
    ///
    /// The subject is not parsed here.
    pub fn verified_claims_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.iss != self.issuer {
            return Err(TokenError::WrongIssuer(claims.iss));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
