//! Filter predicates over the book collection.
//!
//! A [`BookQuery`] is the single description of "which books" shared by the
//! storage adapters: the in-memory store evaluates it with
//! [`BookQuery::matches`], the Postgres store renders it to SQL.

use crate::domain::book::models::Book;
use crate::domain::book::models::PublicationYear;

/// Conjunction of optional book filters. Empty matches every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    author_contains: Option<String>,
    publication_year: Option<PublicationYear>,
}

impl BookQuery {
    /// Query matching every book.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a query from optional filter inputs.
    ///
    /// An author that is empty after trimming is treated as absent.
    pub fn new(author: Option<String>, publication_year: Option<PublicationYear>) -> Self {
        Self::all()
            .with_author(author)
            .with_publication_year(publication_year)
    }

    /// Restrict to authors containing `author`, ignoring case.
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author_contains = author.filter(|a| !a.trim().is_empty());
        self
    }

    /// Restrict to books published in exactly `year`.
    pub fn with_publication_year(mut self, year: Option<PublicationYear>) -> Self {
        self.publication_year = year;
        self
    }

    /// Case-insensitive substring the author must contain, if any.
    pub fn author_contains(&self) -> Option<&str> {
        self.author_contains.as_deref()
    }

    pub fn publication_year(&self) -> Option<PublicationYear> {
        self.publication_year
    }

    /// True when no filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.author_contains.is_none() && self.publication_year.is_none()
    }

    /// Evaluate the predicate against a book.
    pub fn matches(&self, book: &Book) -> bool {
        let author_matches = self.author_contains.as_deref().map_or(true, |needle| {
            book.author
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });

        let year_matches = self
            .publication_year
            .map_or(true, |year| book.publication_year == year);

        author_matches && year_matches
    }
}
