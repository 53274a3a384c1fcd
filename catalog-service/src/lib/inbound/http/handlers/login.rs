use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldViolation;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|access| ApiSuccess::new(StatusCode::OK, LoginResponseData { token: access.token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut violations = Vec::new();
        if self.username.is_empty() {
            violations.push(FieldViolation::new("username", "Username is required"));
        }
        if self.password.is_empty() {
            violations.push(FieldViolation::new("password", "Password is required"));
        }
        if !violations.is_empty() {
            return Err(ApiError::BadRequest(violations));
        }

        Ok(LoginCommand {
            username: self.username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
