use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::parse_year;
use super::ApiError;
use super::ApiSuccess;
use super::BookMessageData;
use super::FieldViolation;
use crate::domain::book::errors::PublicationYearError;
use crate::domain::book::models::Author;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::Title;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookMessageData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    let book = state.book_service.create_book(command).await?;
    tracing::info!(user_id = %caller.user_id, book_id = %book.id, "Book added to catalog");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        BookMessageData::new("Book created successfully", &book),
    ))
}

/// HTTP request body for creating a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    publication_year: Option<Value>,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, ApiError> {
        let title = Title::new(self.title);
        let author = Author::new(self.author);
        let year = parse_year(self.publication_year).and_then(|year| {
            year.ok_or_else(|| PublicationYearError::NotAnInteger(String::new()))
        });

        match (title, author, year) {
            (Ok(title), Ok(author), Ok(year)) => Ok(CreateBookCommand::new(title, author, year)),
            (title, author, year) => {
                let mut violations = Vec::new();
                if let Err(e) = title {
                    violations.push(FieldViolation::new("title", e));
                }
                if let Err(e) = author {
                    violations.push(FieldViolation::new("author", e));
                }
                if let Err(e) = year {
                    violations.push(FieldViolation::new("publicationYear", e));
                }
                Err(ApiError::BadRequest(violations))
            }
        }
    }
}
