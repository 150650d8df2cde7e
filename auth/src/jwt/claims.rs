use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Session token claims.
///
/// Every field is required; a token missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (service name)
    pub iss: String,

    /// Subject (canonical hyphenated user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `issuer` - Service name placed in `iss`
    /// * `user_id` - Authenticated user identifier
    /// * `issued_at` - Issuance instant, truncated to whole seconds
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with `exp = iat + lifetime`
    pub fn for_user(
        issuer: &str,
        user_id: &Uuid,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            iss: issuer.to_string(),
            sub: user_id.hyphenated().to_string(),
            iat,
            exp: iat + lifetime.num_seconds(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid only strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Granted lifetime in seconds.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let user_id = Uuid::new_v4();
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let claims = Claims::for_user("chirpy", &user_id, issued_at, Duration::seconds(3600));

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(claims.lifetime_seconds(), 3600);
    }

    #[test]
    fn test_for_user_truncates_subsecond_issue_time() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();

        let claims = Claims::for_user("chirpy", &Uuid::nil(), issued_at, Duration::seconds(10));

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_010);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            iss: "chirpy".to_string(),
            sub: Uuid::nil().to_string(),
            iat: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
