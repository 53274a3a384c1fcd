use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures deliberately collapse into two kinds so callers
/// never learn which part of a rejected token was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid")]
    InvalidToken,
}
