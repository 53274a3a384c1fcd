use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::parse_year;
use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::query::BookQuery;
use crate::inbound::http::router::AppState;

pub async fn filter_books(
    State(state): State<AppState>,
    payload: Result<Json<FilterBooksRequest>, JsonRejection>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    let Json(body) = payload?;
    let query = body.try_into_query()?;

    state
        .book_service
        .filter_books(&query)
        .await
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books.iter().map(BookData::from).collect()))
}

/// HTTP request body for filtering books (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBooksRequest {
    author: Option<String>,
    #[serde(default)]
    publication_year: Option<Value>,
}

impl FilterBooksRequest {
    fn try_into_query(self) -> Result<BookQuery, ApiError> {
        let year = parse_year(self.publication_year)
            .map_err(|e| ApiError::invalid_field("publicationYear", e))?;

        Ok(BookQuery::new(self.author, year))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::book::models::PublicationYear;

    fn query(body: Value) -> Result<BookQuery, ApiError> {
        serde_json::from_value::<FilterBooksRequest>(body)
            .unwrap()
            .try_into_query()
    }

    #[test]
    fn test_no_filters() {
        assert!(query(json!({ "token": "t" })).unwrap().is_unfiltered());
        assert!(query(json!({ "author": "", "publicationYear": "" }))
            .unwrap()
            .is_unfiltered());
    }

    #[test]
    fn test_string_and_numeric_year() {
        let from_string = query(json!({ "publicationYear": "1984" })).unwrap();
        let from_number = query(json!({ "publicationYear": 1984 })).unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(from_string.publication_year(), Some(PublicationYear(1984)));
    }

    #[test]
    fn test_author_and_year() {
        let q = query(json!({ "author": "herb", "publicationYear": 1965 })).unwrap();
        assert_eq!(q.author_contains(), Some("herb"));
        assert_eq!(q.publication_year(), Some(PublicationYear(1965)));
    }

    #[test]
    fn test_bad_year() {
        assert!(matches!(
            query(json!({ "publicationYear": "nineteen" })),
            Err(ApiError::BadRequest(_))
        ));
    }
}
