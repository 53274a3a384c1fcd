use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::book::errors::AuthorError;
use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::PublicationYearError;
use crate::domain::book::errors::TitleError;

/// Catalog entry.
///
/// Books are not owned by any user; any authenticated caller may change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: Title,
    pub author: Author,
    pub publication_year: PublicationYear,
    pub created_at: DateTime<Utc>,
}

/// Book unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Generate a new random book ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|_| BookIdError::InvalidFormat(s.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty book title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// # Errors
    /// * `Empty` - Title is the empty string
    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.is_empty() {
            return Err(TitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-empty author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    /// # Errors
    /// * `Empty` - Author is the empty string
    pub fn new(author: String) -> Result<Self, AuthorError> {
        if author.is_empty() {
            return Err(AuthorError::Empty);
        }
        Ok(Self(author))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Year of publication. Any integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationYear(pub i32);

impl PublicationYear {
    /// Parse a year from its decimal text form.
    ///
    /// Surrounding whitespace is ignored; anything else that is not an
    /// `i32` is rejected.
    ///
    /// # Errors
    /// * `NotAnInteger` - Text is not a whole number in `i32` range
    pub fn parse(text: &str) -> Result<Self, PublicationYearError> {
        text.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| PublicationYearError::NotAnInteger(text.to_string()))
    }

    /// Narrow a JSON integer to a year.
    ///
    /// # Errors
    /// * `NotAnInteger` - Value does not fit in `i32`
    pub fn from_i64(value: i64) -> Result<Self, PublicationYearError> {
        i32::try_from(value)
            .map(Self)
            .map_err(|_| PublicationYearError::NotAnInteger(value.to_string()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a book to the catalog
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub title: Title,
    pub author: Author,
    pub publication_year: PublicationYear,
}

impl CreateBookCommand {
    pub fn new(title: Title, author: Author, publication_year: PublicationYear) -> Self {
        Self {
            title,
            author,
            publication_year,
        }
    }
}

/// Command to update an existing book with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookCommand {
    pub title: Option<Title>,
    pub author: Option<Author>,
    pub publication_year: Option<PublicationYear>,
}

impl UpdateBookCommand {
    /// True when the command would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.publication_year.is_none()
    }

    /// Apply the provided fields to `book`.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.publication_year {
            book.publication_year = year;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: BookId::new(),
            title: Title::new("Dune".to_string()).unwrap(),
            author: Author::new("Frank Herbert".to_string()).unwrap(),
            publication_year: PublicationYear(1965),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_title_and_author_must_be_non_empty() {
        assert_eq!(Title::new(String::new()), Err(TitleError::Empty));
        assert_eq!(Author::new(String::new()), Err(AuthorError::Empty));
        assert!(Title::new(" ".to_string()).is_ok());
    }

    #[test]
    fn test_publication_year_parse() {
        assert_eq!(PublicationYear::parse("1984"), Ok(PublicationYear(1984)));
        assert_eq!(PublicationYear::parse(" 1984 "), Ok(PublicationYear(1984)));
        assert_eq!(PublicationYear::parse("-300"), Ok(PublicationYear(-300)));
        assert!(PublicationYear::parse("1984.5").is_err());
        assert!(PublicationYear::parse("nineteen").is_err());
        assert!(PublicationYear::parse("").is_err());
    }

    #[test]
    fn test_publication_year_from_i64_range() {
        assert_eq!(PublicationYear::from_i64(2024), Ok(PublicationYear(2024)));
        assert!(PublicationYear::from_i64(i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn test_book_id_parse() {
        let id = BookId::new();
        assert_eq!(BookId::from_string(&id.to_string()), Ok(id));
        assert!(BookId::from_string("42").is_err());
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let mut book = book();
        let command = UpdateBookCommand {
            title: Some(Title::new("Dune Messiah".to_string()).unwrap()),
            author: None,
            publication_year: Some(PublicationYear(1969)),
        };

        command.apply_to(&mut book);

        assert_eq!(book.title.as_str(), "Dune Messiah");
        assert_eq!(book.author.as_str(), "Frank Herbert");
        assert_eq!(book.publication_year, PublicationYear(1969));
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateBookCommand::default().is_empty());
        let mut book = book();
        let before = book.clone();
        UpdateBookCommand::default().apply_to(&mut book);
        assert_eq!(book, before);
    }
}
