use chrono::Duration;

/// Session lifetime policy applied by login callers before issuing a token.
///
/// Requested values are resolved literally: absent or non-positive falls
/// back to the default, above the maximum is cut to the maximum, anything
/// else passes through. With default == maximum only requests strictly
/// inside `1..=max` change the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimePolicy {
    default_seconds: i64,
    max_seconds: i64,
}

impl LifetimePolicy {
    pub const DEFAULT_SECONDS: i64 = 3600;
    pub const MAX_SECONDS: i64 = 3600;

    pub fn new(default_seconds: i64, max_seconds: i64) -> Self {
        Self {
            default_seconds,
            max_seconds,
        }
    }

    /// Resolve a requested lifetime.
    ///
    /// # Arguments
    /// * `requested_seconds` - Client-supplied `expires_in_seconds`, if any
    pub fn clamp(&self, requested_seconds: Option<i64>) -> Duration {
        let seconds = match requested_seconds {
            None => self.default_seconds,
            Some(v) if v <= 0 => self.default_seconds,
            Some(v) if v > self.max_seconds => self.max_seconds,
            Some(v) => v,
        };

        Duration::seconds(seconds)
    }

    pub fn default_seconds(&self) -> i64 {
        self.default_seconds
    }

    pub fn max_seconds(&self) -> i64 {
        self.max_seconds
    }
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SECONDS, Self::MAX_SECONDS)
    }
}
