use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::domain::book::errors::BookError;
use crate::domain::book::errors::PublicationYearError;
use crate::domain::book::models::Book;
use crate::domain::book::models::PublicationYear;
use crate::domain::user::errors::UserError;

pub mod create_book;
pub mod delete_book;
pub mod filter_books;
pub mod health;
pub mod list_books;
pub mod login;
pub mod register;
pub mod update_book;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }

    pub fn status(&self) -> StatusCode {
        self.0
    }

    pub fn data(&self) -> &T {
        &self.1 .0
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(Vec<FieldViolation>),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn invalid_field(field: &str, message: impl ToString) -> Self {
        Self::BadRequest(vec![FieldViolation::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(errors) => {
                (status, Json(ValidationErrorBody { errors })).into_response()
            }
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    status,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::NotFound(error)
            | ApiError::Conflict(error)
            | ApiError::Unauthorized(error)
            | ApiError::Forbidden(error) => (status, Json(ErrorBody { error })).into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_field("body", rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(ref e) => ApiError::invalid_field("username", e),
            UserError::InvalidPassword(ref e) => ApiError::invalid_field("password", e),
            UserError::NotFoundByUsername(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::Hashing(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidBookId(ref e) => ApiError::invalid_field("id", e),
            BookError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldViolation>,
}

/// Book as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            publication_year: book.publication_year.value(),
        }
    }
}

/// Envelope for single-book write responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookMessageData {
    pub message: String,
    pub book: BookData,
}

impl BookMessageData {
    pub fn new(message: &str, book: &Book) -> Self {
        Self {
            message: message.to_string(),
            book: book.into(),
        }
    }
}

/// Read a publication year sent as a JSON integer or numeric string.
///
/// `null` and the empty string count as absent.
pub(crate) fn parse_year(
    value: Option<Value>,
) -> Result<Option<PublicationYear>, PublicationYearError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => PublicationYear::parse(&text).map(Some),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(n) => PublicationYear::from_i64(n).map(Some),
            None => Err(PublicationYearError::NotAnInteger(number.to_string())),
        },
        Some(other) => Err(PublicationYearError::NotAnInteger(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_year_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_year(Some(json!(1965))), Ok(Some(PublicationYear(1965))));
        assert_eq!(parse_year(Some(json!("1984"))), Ok(Some(PublicationYear(1984))));
        assert_eq!(parse_year(Some(json!(-44))), Ok(Some(PublicationYear(-44))));
    }

    #[test]
    fn test_parse_year_absent_values() {
        assert_eq!(parse_year(None), Ok(None));
        assert_eq!(parse_year(Some(Value::Null)), Ok(None));
        assert_eq!(parse_year(Some(json!(""))), Ok(None));
    }

    #[test]
    fn test_parse_year_rejects_non_integers() {
        assert!(parse_year(Some(json!(1965.5))).is_err());
        assert!(parse_year(Some(json!("MCMLXV"))).is_err());
        assert!(parse_year(Some(json!(true))).is_err());
        assert!(parse_year(Some(json!([1965]))).is_err());
        assert!(parse_year(Some(json!(10_000_000_000_i64))).is_err());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::from(UserError::UsernameAlreadyExists("alice".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(UserError::NotFoundByUsername("alice".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(UserError::DatabaseError("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(BookError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_book_data_uses_camel_case() {
        let data = BookData {
            id: "1".to_string(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            publication_year: 1965,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "id": "1", "title": "Dune", "author": "Herbert", "publicationYear": 1965 })
        );
    }
}
