//! Process-local stores implementing the repository ports.
//!
//! Each operation runs under one lock acquisition, so the uniqueness check
//! and insert of a registration cannot interleave with another.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::query::BookQuery;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(store: &str) -> String {
    format!("{} store lock poisoned", store)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserError::DatabaseError(poisoned("user")))?;

        if users.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::DatabaseError(poisoned("user")))?;

        Ok(users.get(username).cloned())
    }
}

/// Books kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| BookError::DatabaseError(poisoned("book")))?;

        books.push(book.clone());
        Ok(book)
    }

    async fn update(
        &self,
        id: &BookId,
        changes: &UpdateBookCommand,
    ) -> Result<Option<Book>, BookError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| BookError::DatabaseError(poisoned("book")))?;

        Ok(books.iter_mut().find(|book| book.id == *id).map(|book| {
            changes.apply_to(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| BookError::DatabaseError(poisoned("book")))?;

        let position = books.iter().position(|book| book.id == *id);
        Ok(position.map(|index| books.remove(index)))
    }

    async fn find(&self, query: &BookQuery) -> Result<Vec<Book>, BookError> {
        let books = self
            .books
            .read()
            .map_err(|_| BookError::DatabaseError(poisoned("book")))?;

        Ok(books
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect())
    }
}
