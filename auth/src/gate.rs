//! Admission decision for protected operations.
//!
//! The gate only looks at the presented token and a verifier, so the same
//! decision applies in front of every protected operation regardless of
//! how the token was transported.

use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Anything that can turn a token into verified claims.
pub trait TokenVerifier {
    /// Verify a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature does not match
    /// * `TokenExpired` - Token is authentic but past its expiry
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError>;
}

impl TokenVerifier for JwtHandler {
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify(token)
    }
}

/// Identity established by a successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

/// Why a request was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    /// No credential was presented.
    #[error("Authentication required")]
    Unauthenticated,

    /// A credential was presented but is invalid or expired.
    #[error("Access denied: {0}")]
    Forbidden(JwtError),
}

/// Decide whether a request carrying `token` may proceed.
///
/// An absent or empty token is `Unauthenticated`; anything the verifier
/// rejects is `Forbidden`.
///
/// # Errors
/// * `Unauthenticated` - No token
/// * `Forbidden` - Token failed verification
pub fn admit<V>(verifier: &V, token: Option<&str>) -> Result<Identity, GateRejection>
where
    V: TokenVerifier + ?Sized,
{
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return Err(GateRejection::Unauthenticated),
    };

    verifier
        .verify_token(token)
        .map(Identity::from)
        .map_err(GateRejection::Forbidden)
}
