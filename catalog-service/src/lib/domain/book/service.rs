use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;
use crate::domain::book::query::BookQuery;

/// Domain service implementation for catalog operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    /// Create a new book service.
    ///
    /// # Arguments
    /// * `repository` - Book persistence implementation
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let book = Book {
            id: BookId::new(),
            title: command.title,
            author: command.author,
            publication_year: command.publication_year,
            created_at: Utc::now(),
        };

        let created = self.repository.create(book).await?;
        tracing::info!(book_id = %created.id, "Book created");

        Ok(created)
    }

    async fn update_book(
        &self,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let updated = self
            .repository
            .update(id, &command)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        tracing::info!(book_id = %updated.id, "Book updated");

        Ok(updated)
    }

    async fn delete_book(&self, id: &BookId) -> Result<Book, BookError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        tracing::info!(book_id = %deleted.id, "Book deleted");

        Ok(deleted)
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.find(&BookQuery::all()).await
    }

    async fn filter_books(&self, query: &BookQuery) -> Result<Vec<Book>, BookError> {
        let books = self.repository.find(query).await?;
        tracing::debug!(
            author = ?query.author_contains(),
            publication_year = ?query.publication_year(),
            matched = books.len(),
            "Books filtered"
        );
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::book::models::Author;
    use crate::domain::book::models::PublicationYear;
    use crate::domain::book::models::Title;

    mock! {
        pub TestBookRepository {}

        #[async_trait]
        impl BookRepository for TestBookRepository {
            async fn create(&self, book: Book) -> Result<Book, BookError>;
            async fn update(&self, id: &BookId, changes: &UpdateBookCommand) -> Result<Option<Book>, BookError>;
            async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError>;
            async fn find(&self, query: &BookQuery) -> Result<Vec<Book>, BookError>;
        }
    }

    fn dune() -> Book {
        Book {
            id: BookId::new(),
            title: Title::new("Dune".to_string()).unwrap(),
            author: Author::new("Herbert".to_string()).unwrap(),
            publication_year: PublicationYear(1965),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_book_assigns_id() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_create()
            .withf(|book| book.title.as_str() == "Dune" && book.publication_year.value() == 1965)
            .times(1)
            .returning(Ok);

        let service = BookService::new(Arc::new(repository));
        let command = CreateBookCommand::new(
            Title::new("Dune".to_string()).unwrap(),
            Author::new("Herbert".to_string()).unwrap(),
            PublicationYear(1965),
        );

        let book = service.create_book(command).await.unwrap();
        assert_eq!(book.author.as_str(), "Herbert");
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = BookService::new(Arc::new(repository));
        let result = service
            .update_book(&BookId::new(), UpdateBookCommand::default())
            .await;

        assert!(matches!(result, Err(BookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_book_passes_changes() {
        let book = dune();
        let id = book.id;
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_update()
            .withf(move |book_id, changes| {
                *book_id == id
                    && changes.title.as_ref().map(|t| t.as_str()) == Some("Dune Messiah")
                    && changes.author.is_none()
            })
            .times(1)
            .returning(move |_, changes| {
                let mut updated = book.clone();
                changes.apply_to(&mut updated);
                Ok(Some(updated))
            });

        let service = BookService::new(Arc::new(repository));
        let command = UpdateBookCommand {
            title: Some(Title::new("Dune Messiah".to_string()).unwrap()),
            ..UpdateBookCommand::default()
        };

        let updated = service.update_book(&id, command).await.unwrap();
        assert_eq!(updated.title.as_str(), "Dune Messiah");
        assert_eq!(updated.author.as_str(), "Herbert");
    }

    #[tokio::test]
    async fn test_delete_book_returns_removed_record() {
        let book = dune();
        let id = book.id;
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_delete()
            .withf(move |book_id| *book_id == id)
            .times(1)
            .returning(move |_| Ok(Some(book.clone())));

        let service = BookService::new(Arc::new(repository));
        let deleted = service.delete_book(&id).await.unwrap();

        assert_eq!(deleted.id, id);
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut repository = MockTestBookRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repository));
        let result = service.delete_book(&BookId::new()).await;

        assert!(matches!(result, Err(BookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_books_uses_unfiltered_query() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_find()
            .withf(|query| query.is_unfiltered())
            .times(1)
            .returning(|_| Ok(vec![dune(), dune()]));

        let service = BookService::new(Arc::new(repository));
        let books = service.list_books().await.unwrap();

        assert_eq!(books.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_books_forwards_query() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_find()
            .withf(|query| {
                query.author_contains() == Some("herb")
                    && query.publication_year() == Some(PublicationYear(1965))
            })
            .times(1)
            .returning(|_| Ok(vec![dune()]));

        let service = BookService::new(Arc::new(repository));
        let query = BookQuery::new(Some("herb".to_string()), Some(PublicationYear(1965)));
        let books = service.filter_books(&query).await.unwrap();

        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_find()
            .times(1)
            .returning(|_| Err(BookError::DatabaseError("boom".to_string())));

        let service = BookService::new(Arc::new(repository));
        let result = service.list_books().await;

        assert!(matches!(result, Err(BookError::DatabaseError(_))));
    }
}
