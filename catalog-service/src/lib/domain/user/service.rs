use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AccountServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service for registration and login.
///
/// Argon2 work runs on the blocking pool so request tasks are never stalled
/// by hashing.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Shared hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Hashing(e.to_string()))?
                .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(command.username.clone()))?;

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let user_id = user.id.to_string();
        let password = command.password;
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &user_id)
        })
        .await
        .map_err(|e| UserError::Token(e.to_string()))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                UserError::InvalidCredentials
            }
            AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AccessToken {
            token: result.access_token,
        })
    }
}
