pub mod argon2;
pub mod errors;
pub mod verifier;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;
pub use verifier::CredentialVerifier;
pub use verifier::PasswordHashing;
