use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::PublicationYear;
use crate::domain::book::models::Title;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::query::BookQuery;

const BOOK_COLUMNS: &str = "id, title, author, publication_year, created_at";

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    publication_year: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: String| BookError::DatabaseError(format!("Corrupt book {}: {}", id, e));
        Ok(Book {
            id: BookId(id),
            title: Title::new(row.title).map_err(|e| corrupt(e.to_string()))?,
            author: Author::new(row.author).map_err(|e| corrupt(e.to_string()))?,
            publication_year: PublicationYear(row.publication_year),
            created_at: row.created_at,
        })
    }
}

/// Start a `SELECT` over books restricted by `query`.
///
/// The author filter is a literal, case-insensitive substring test via
/// `strpos`, so `%`, `_` and regex metacharacters in the input are inert.
///
/// Case folding is done by Postgres `lower()`, which follows the database's
/// `LC_CTYPE`. Under a UTF-8 locale it agrees with [`BookQuery::matches`];
/// under the `C` locale only ASCII letters fold, so `"émile"` would not
/// find `"Émile"`.
pub(crate) fn select_matching(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
    let mut separator = " WHERE ";

    if let Some(author) = query.author_contains() {
        builder.push(separator);
        builder.push("strpos(lower(author), lower(");
        builder.push_bind(author.to_string());
        builder.push(")) > 0");
        separator = " AND ";
    }

    if let Some(year) = query.publication_year() {
        builder.push(separator);
        builder.push("publication_year = ");
        builder.push_bind(year.value());
    }

    builder.push(" ORDER BY created_at, id");
    builder
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, publication_year, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.publication_year.value())
        .bind(book.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(book)
    }

    async fn update(
        &self,
        id: &BookId,
        changes: &UpdateBookCommand,
    ) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                publication_year = COALESCE($4, publication_year)
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id.0)
        .bind(changes.title.as_ref().map(|t| t.as_str().to_string()))
        .bind(changes.author.as_ref().map(|a| a.as_str().to_string()))
        .bind(changes.publication_year.map(|y| y.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "DELETE FROM books WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn find(&self, query: &BookQuery) -> Result<Vec<Book>, BookError> {
        let rows = select_matching(query)
            .build_query_as::<BookRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query_has_no_where_clause() {
        let builder = select_matching(&BookQuery::all());
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, publication_year, created_at FROM books ORDER BY created_at, id"
        );
    }

    #[test]
    fn test_author_filter_sql() {
        let builder = select_matching(&BookQuery::new(Some("tolk".to_string()), None));
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, publication_year, created_at FROM books \
             WHERE strpos(lower(author), lower($1)) > 0 ORDER BY created_at, id"
        );
    }

    #[test]
    fn test_year_filter_sql() {
        let builder = select_matching(&BookQuery::new(None, Some(PublicationYear(1984))));
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, publication_year, created_at FROM books \
             WHERE publication_year = $1 ORDER BY created_at, id"
        );
    }

    #[test]
    fn test_combined_filter_sql() {
        let builder = select_matching(&BookQuery::new(
            Some("orwell".to_string()),
            Some(PublicationYear(1949)),
        ));
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, publication_year, created_at FROM books \
             WHERE strpos(lower(author), lower($1)) > 0 AND publication_year = $2 \
             ORDER BY created_at, id"
        );
    }
}
