use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid book ID: {0}")]
    InvalidFormat(String),
}

/// Error for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is required")]
    Empty,
}

/// Error for Author validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorError {
    #[error("Author is required")]
    Empty,
}

/// Error for PublicationYear parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublicationYearError {
    #[error("Publication year must be a valid number")]
    NotAnInteger(String),
}

/// Top-level error for book operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Book not found")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
