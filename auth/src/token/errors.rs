use thiserror::Error;

/// Error type for token operations.
///
/// Expired and tampered tokens collapse into a single `InvalidOrExpired`
/// cause: callers must not be able to tell them apart.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid or expired token")]
    InvalidOrExpired,
}
