use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::query::BookQuery;

/// Port for catalog operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a book to the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Change the provided fields of a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: &BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Remove a book, returning the removed record.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Every book in the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Books matching a query.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn filter_books(&self, query: &BookQuery) -> Result<Vec<Book>, BookError>;
}

/// Persistence operations for books.
///
/// Each operation is a single atomic write or read at the store.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist a new book.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Apply a partial update in place.
    ///
    /// # Returns
    /// The updated book, or None if no book has this id
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: &BookId,
        changes: &UpdateBookCommand,
    ) -> Result<Option<Book>, BookError>;

    /// Remove a book.
    ///
    /// # Returns
    /// The removed book, or None if no book has this id
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    /// Retrieve every book matching `query`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, query: &BookQuery) -> Result<Vec<Book>, BookError>;
}
