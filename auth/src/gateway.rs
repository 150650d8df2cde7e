use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::bearer::BearerExtractor;
use crate::bearer::CredentialError;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::Argon2Hasher;
use crate::password::CredentialVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHashing;

/// Authentication gateway combining credential verification and session tokens.
///
/// Login runs `verify_credentials` then `issue_token`; protected requests run
/// `authenticate`, which extracts the bearer token and validates it. Issuer and
/// validator are built from the same injected secret.
pub struct AuthGateway<H = Argon2Hasher> {
    verifier: CredentialVerifier<H>,
    issuer: TokenIssuer,
    validator: TokenValidator,
    // Hashed on first use; None if hashing failed
    placeholder_hash: OnceLock<Option<String>>,
}

const PLACEHOLDER_PASSWORD: &str = "chirpy-placeholder-password";

/// Authentication failure with the internal reason preserved.
///
/// Use [`AuthError::rejection`] to decide what a client gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Credential mismatch")]
    CredentialMismatch,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Client-visible outcome of an authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The caller failed to prove an identity
    Unauthorized,
    /// The server failed; nothing the caller did wrong
    Internal,
}

impl AuthError {
    /// Collapse the internal reason into the outcome shown to clients.
    ///
    /// A malformed stored hash is a server-side fault but still surfaces as
    /// a plain authentication failure.
    pub fn rejection(&self) -> Rejection {
        match self {
            AuthError::Token(TokenError::SigningFailed(_))
            | AuthError::Password(PasswordError::HashingFailed(_)) => Rejection::Internal,
            AuthError::CredentialMismatch
            | AuthError::Password(PasswordError::MalformedHash(_))
            | AuthError::Credential(_)
            | AuthError::Token(_) => Rejection::Unauthorized,
        }
    }
}

impl AuthGateway<Argon2Hasher> {
    /// Create a gateway with Argon2id password hashing.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    pub fn new(secret: &[u8]) -> Self {
        Self::with_hasher(secret, Argon2Hasher::new())
    }
}

impl<H: PasswordHashing> AuthGateway<H> {
    /// Create a gateway with a custom hashing capability.
    pub fn with_hasher(secret: &[u8], hasher: H) -> Self {
        Self {
            verifier: CredentialVerifier::new(hasher),
            issuer: TokenIssuer::new(secret),
            validator: TokenValidator::new(secret),
            placeholder_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.verifier.hasher().hash(password)
    }

    /// Verify a password against the stored hash.
    ///
    /// # Errors
    /// * `CredentialMismatch` - Password does not match
    /// * `Password` - Stored hash is unusable
    pub fn verify_credentials(&self, password: &str, stored_hash: &str) -> Result<(), AuthError> {
        if self.verifier.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthError::CredentialMismatch)
        }
    }

    /// Reject a login for an email with no account.
    ///
    /// Runs one password comparison against a placeholder hash so the
    /// response takes as long as a wrong password for a real account.
    /// Always yields `CredentialMismatch`. Blocking, like `login`.
    pub fn reject_unknown_account(&self, password: &str) -> AuthError {
        let placeholder = self
            .placeholder_hash
            .get_or_init(|| self.hash_password(PLACEHOLDER_PASSWORD).ok());

        if let Some(hash) = placeholder {
            let _ = self.verifier.verify(password, hash);
        }

        AuthError::CredentialMismatch
    }

    /// Issue a session token for an already verified user.
    ///
    /// # Errors
    /// * `Token(SigningFailed)` - Token encoding failed
    pub fn issue_token(&self, user_id: &Uuid, lifetime: Duration) -> Result<String, AuthError> {
        Ok(self.issuer.issue(user_id, lifetime)?)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Blocking: password comparison is deliberately slow.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identity the token is issued for
    /// * `lifetime` - Already clamped token lifetime
    ///
    /// # Errors
    /// * `CredentialMismatch` - Password does not match
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Token generation failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &Uuid,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        self.verify_credentials(password, stored_hash)?;
        self.issue_token(user_id, lifetime)
    }

    /// Resolve the acting user from an `Authorization` header value.
    ///
    /// # Errors
    /// * `Credential` - Header absent or not a bearer credential
    /// * `Token` - Token failed validation
    pub fn authenticate(&self, header_value: Option<&str>) -> Result<Uuid, AuthError> {
        self.authenticate_at(header_value, Utc::now())
    }

    /// Resolve the acting user at an explicit instant.
    pub fn authenticate_at(
        &self,
        header_value: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, AuthError> {
        let token = BearerExtractor::extract(header_value)?;

        Ok(self.validator.validate_at(token, now)?)
    }

    /// Token validator sharing this gateway's secret.
    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }
}
