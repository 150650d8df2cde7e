use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate root entity.
///
/// A short post attributed to the user who was authenticated when it was written.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// Length is checked on the raw text, then profane words are masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// Length limit in bytes.
    pub const MAX_LENGTH: usize = 140;

    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const MASK: &'static str = "****";

    /// Create a new validated, cleaned chirp body.
    ///
    /// # Arguments
    /// * `body` - Raw text as submitted
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds 140 bytes
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.len();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(Self::clean(&body)))
    }

    /// Rehydrate a body that was validated before it was stored.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    /// Mask profane words. Words are split on single spaces only, so a
    /// word with punctuation attached is left as is.
    fn clean(body: &str) -> String {
        body.split(' ')
            .map(|word| {
                if Self::PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a chirp on behalf of an authenticated user
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub author: UserId,
    pub body: ChirpBody,
}

impl CreateChirpCommand {
    pub fn new(author: UserId, body: ChirpBody) -> Self {
        Self { author, body }
    }
}
