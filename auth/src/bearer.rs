use thiserror::Error;

/// Scheme prefix expected in the `Authorization` header. Case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error type for credential header extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not valid visible ASCII")]
    InvalidEncoding,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    UnsupportedScheme,

    #[error("Bearer credential is empty")]
    Empty,
}

/// Pulls the raw token out of an `Authorization` header value.
///
/// Purely structural; the token itself is not inspected.
pub struct BearerExtractor;

impl BearerExtractor {
    /// Extract the token from a `Bearer <token>` header value.
    ///
    /// Whitespace around the remainder is trimmed, so `"Bearer   abc"`
    /// yields `"abc"`. Whitespace before the scheme is not tolerated.
    ///
    /// # Errors
    /// * `Missing` - No header value
    /// * `UnsupportedScheme` - Value does not start with `Bearer `
    /// * `Empty` - Nothing but whitespace after the scheme
    pub fn extract(header_value: Option<&str>) -> Result<&str, CredentialError> {
        let value = header_value.ok_or(CredentialError::Missing)?;

        let token = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(CredentialError::UnsupportedScheme)?
            .trim();

        if token.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        assert_eq!(BearerExtractor::extract(Some("Bearer abc123")), Ok("abc123"));
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(
            BearerExtractor::extract(None),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn test_extract_empty_header() {
        assert_eq!(
            BearerExtractor::extract(Some("")),
            Err(CredentialError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_extract_other_scheme() {
        assert_eq!(
            BearerExtractor::extract(Some("Basic abc123")),
            Err(CredentialError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_extract_scheme_is_case_sensitive() {
        assert_eq!(
            BearerExtractor::extract(Some("bearer abc123")),
            Err(CredentialError::UnsupportedScheme)
        );
        assert_eq!(
            BearerExtractor::extract(Some("BEARER abc123")),
            Err(CredentialError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_extract_trims_extra_internal_whitespace() {
        assert_eq!(
            BearerExtractor::extract(Some("Bearer   abc123")),
            Ok("abc123")
        );
        assert_eq!(
            BearerExtractor::extract(Some("Bearer abc123 \t")),
            Ok("abc123")
        );
    }

    #[test]
    fn test_extract_rejects_leading_whitespace() {
        assert_eq!(
            BearerExtractor::extract(Some(" Bearer abc123")),
            Err(CredentialError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_extract_scheme_without_token() {
        assert_eq!(
            BearerExtractor::extract(Some("Bearer ")),
            Err(CredentialError::Empty)
        );
        assert_eq!(
            BearerExtractor::extract(Some("Bearer    ")),
            Err(CredentialError::Empty)
        );
        // No separating space at all
        assert_eq!(
            BearerExtractor::extract(Some("Bearer")),
            Err(CredentialError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_extract_does_not_inspect_token() {
        assert_eq!(
            BearerExtractor::extract(Some("Bearer not-a-jwt")),
            Ok("not-a-jwt")
        );
    }
}
