use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
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
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::BookId;
use crate::domain::book::models::Title;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_book(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookMessageData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    let book = state.book_service.update_book(&book_id, command).await?;
    tracing::info!(user_id = %caller.user_id, book_id = %book.id, "Book changed");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        BookMessageData::new("Book updated successfully", &book),
    ))
}

/// HTTP request body for a partial book update (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    publication_year: Option<Value>,
}

impl UpdateBookRequest {
    /// Validate the provided fields; absent fields stay untouched.
    fn try_into_command(self) -> Result<UpdateBookCommand, ApiError> {
        let title = self.title.map(Title::new).transpose();
        let author = self.author.map(Author::new).transpose();
        let year = parse_year(self.publication_year);

        match (title, author, year) {
            (Ok(title), Ok(author), Ok(publication_year)) => Ok(UpdateBookCommand {
                title,
                author,
                publication_year,
            }),
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
