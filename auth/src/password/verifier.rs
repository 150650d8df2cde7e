use super::argon2::Argon2Hasher;
use super::errors::PasswordError;

/// Pluggable one-way password hashing capability.
///
/// Implementations must be slow, salted, and compare in constant time.
pub trait PasswordHashing: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Compare a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only an unusable hash is an error.
    fn compare(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Checks candidate passwords against stored hashes.
///
/// Pure function of its inputs. Comparison is CPU-bound and deliberately
/// slow, so async callers should run it on a blocking thread.
#[derive(Debug, Clone, Default)]
pub struct CredentialVerifier<H = Argon2Hasher> {
    hasher: H,
}

impl<H: PasswordHashing> CredentialVerifier<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Verify a candidate password.
    ///
    /// # Arguments
    /// * `candidate` - Plaintext password presented by the caller
    /// * `stored_hash` - Hash stored alongside the user
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash was not produced by the expected algorithm
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.hasher.compare(candidate, stored_hash)
    }

    /// Hashing capability backing this verifier.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}
