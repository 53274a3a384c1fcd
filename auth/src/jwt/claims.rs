use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Serialized as `{"userId": ..., "iat": ..., "exp": ...}`, timestamps in
/// Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl`
    pub fn for_user(user_id: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), ttl)
    }

    /// Create claims for a user with an explicit issue time.
    pub fn issued_at(user_id: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if the claims are expired at the given Unix timestamp.
    ///
    /// A token is still valid during the second it expires in.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
