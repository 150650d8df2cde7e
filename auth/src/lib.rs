//! Authentication and session-token library
//!
//! Provides the credential and token pipeline behind every protected request:
//! - Password hashing and verification (Argon2id behind a pluggable trait)
//! - Session token issuance and validation (HS256 JWT)
//! - Bearer credential extraction
//! - A gateway composing the above for login and per-request authentication
//!
//! Every component is stateless apart from the injected signing secret, so a
//! single instance can be shared across threads without locking.
//!
//! # Examples
//!
//! ## Password Verification
//! ```
//! use auth::{Argon2Hasher, CredentialVerifier, PasswordHashing};
//!
//! let verifier = CredentialVerifier::new(Argon2Hasher::new());
//! let hash = verifier.hasher().hash("my_password").unwrap();
//! assert!(verifier.verify("my_password", &hash).unwrap());
//! assert!(!verifier.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenIssuer, TokenValidator};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let user_id = Uuid::new_v4();
//!
//! let token = TokenIssuer::new(secret).issue(&user_id, Duration::hours(1)).unwrap();
//! assert_eq!(TokenValidator::new(secret).validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthGateway, LifetimePolicy};
//! use uuid::Uuid;
//!
//! let gateway = AuthGateway::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = gateway.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let lifetime = LifetimePolicy::default().clamp(Some(7200));
//! let token = gateway.login("password123", &hash, &user_id, lifetime).unwrap();
//!
//! // Protected request: header to identity
//! let header = format!("Bearer {}", token);
//! assert_eq!(gateway.authenticate(Some(&header)).unwrap(), user_id);
//! ```

pub mod bearer;
pub mod gateway;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use bearer::BearerExtractor;
pub use bearer::CredentialError;
pub use gateway::AuthError;
pub use gateway::AuthGateway;
pub use gateway::Rejection;
pub use jwt::Claims;
pub use jwt::LifetimePolicy;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::Argon2Hasher;
pub use password::CredentialVerifier;
pub use password::PasswordError;
pub use password::PasswordHashing;
