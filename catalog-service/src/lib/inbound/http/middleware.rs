use auth::GateRejection;
use axum::body::Body;
use axum::body::Bytes;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Largest request body the gate will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that admits requests carrying a valid token.
///
/// The token is read from the `token` field of the JSON body, falling back
/// to an `Authorization: Bearer` header. The body is buffered and handed on
/// unchanged so handlers can still extract it.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::invalid_field("body", e))?;

    let presented = token_from_body(&bytes)?.or_else(|| token_from_header(&parts.headers));

    let identity = state
        .authenticator
        .admit(presented.as_deref())
        .map_err(|rejection| {
            tracing::warn!(
                method = %parts.method,
                uri = %parts.uri,
                reason = %rejection,
                "Request rejected by auth gate"
            );
            ApiError::from(rejection)
        })?;

    let user_id = UserId::from_string(&identity.user_id).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::Forbidden("Invalid or expired token".to_string())
    })?;

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::Unauthenticated => {
                ApiError::Unauthorized("Authentication required".to_string())
            }
            GateRejection::Forbidden(_) => {
                ApiError::Forbidden("Invalid or expired token".to_string())
            }
        }
    }
}

/// Pull the `token` field out of a JSON body.
///
/// Falsy JSON values (`null`, `false`, `0`, `""`) count as absent. Any other
/// non-string value is passed on in its JSON form, which can never verify.
fn token_from_body(bytes: &Bytes) -> Result<Option<String>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::invalid_field("body", format!("Malformed JSON: {}", e)))?;

    let token = match body.get("token") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(token)) if token.is_empty() => None,
        Some(Value::String(token)) => Some(token.clone()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(other) => Some(other.to_string()),
    };

    Ok(token)
}

fn token_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
