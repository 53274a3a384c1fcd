use chrono::Duration;

use crate::gate;
use crate::gate::GateRejection;
use crate::gate::Identity;
use crate::gate::TokenVerifier;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the process-wide signing secret and the token lifetime; built once
/// at startup and shared read-only afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identity to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(user_id, self.token_ttl)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation failed
    /// * `TokenExpired` - Token is past its expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Run the admission gate against this authenticator's verifier.
    ///
    /// # Errors
    /// * `Unauthenticated` - No token presented
    /// * `Forbidden` - Token failed verification
    pub fn admit(&self, token: Option<&str>) -> Result<Identity, GateRejection> {
        gate::admit(self, token)
    }
}

impl TokenVerifier for Authenticator {
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token)
    }
}
