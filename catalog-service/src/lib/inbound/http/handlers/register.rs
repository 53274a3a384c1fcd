use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldViolation;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    message: "User registered successfully".to_string(),
                    id: user.id.to_string(),
                },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    /// Validate every field, reporting all violations at once.
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let username = Username::new(self.username);
        let password = Password::new(self.password);

        match (username, password) {
            (Ok(username), Ok(password)) => Ok(RegisterCommand::new(username, password)),
            (username, password) => {
                let mut violations = Vec::new();
                if let Err(e) = username {
                    violations.push(FieldViolation::new("username", e));
                }
                if let Err(e) = password {
                    violations.push(FieldViolation::new("password", e));
                }
                Err(ApiError::BadRequest(violations))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub id: String,
}
