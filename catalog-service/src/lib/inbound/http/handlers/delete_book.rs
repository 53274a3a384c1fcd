use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::BookMessageData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BookMessageData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;

    let book = state.book_service.delete_book(&book_id).await?;
    tracing::info!(user_id = %caller.user_id, book_id = %book.id, "Book removed from catalog");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        BookMessageData::new("Book deleted successfully", &book),
    ))
}
