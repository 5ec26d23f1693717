use async_trait::async_trait;
use thiserror::Error;

/// Failures inside a validator that prevent it from reaching a verdict.
///
/// A mismatched or malformed token is NOT an error: it is `Ok(false)`.
/// Callers must treat any `Err` as a denial.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("session seed unavailable")]
    MissingSeed,
    #[error("validator backend error: {0}")]
    Backend(String),
}

/// Proof-of-possession check for a CSRF token against a subject string.
///
/// Implementations own the key material (session seed, server key) and must
/// guarantee that a token issued for one subject never validates for another.
///
/// Implementations must be cheap to share across requests (`Send + Sync`).
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `token` is the raw caller-supplied value; an absent token is passed as `""`.
    async fn validate(&self, token: &str, subject: &str) -> Result<bool, ValidatorError>;
}
