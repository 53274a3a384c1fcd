//! Authentication utilities for the book catalog.
//!
//! - Password hashing (Argon2id)
//! - JWT issuing and verification
//! - The admission gate applied in front of protected operations
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use auth::GateRejection;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Protected call: admit the token
//! let identity = auth.admit(Some(&result.access_token)).unwrap();
//! assert_eq!(identity.user_id, "user123");
//! assert_eq!(auth.admit(None), Err(GateRejection::Unauthenticated));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::GateRejection;
pub use gate::Identity;
pub use gate::TokenVerifier;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
