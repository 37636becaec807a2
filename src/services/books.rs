//! Book management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, BookPayload, BookSummary},
    repository::Repository,
};

use super::{clock::Clock, ids::IdGenerator};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            repository,
            clock,
            ids,
        }
    }

    /// Validate and store a new book, returning its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        let (name, payload) = payload.into_validated().map_err(|failure| {
            tracing::warn!("Rejected new book: {}", failure);
            failure
        })?;

        let id = self.ids.generate();
        let book = Book::new(id.clone(), name, payload, self.clock.now());
        let total = self.repository.books.insert(book).await;

        tracing::info!("Book added id={} ({} on shelf)", id, total);
        Ok(id)
    }

    /// Summaries of the books matching every filter present
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let books = self.repository.books.list(filter).await;
        tracing::debug!(
            "Listed {} books (name={:?}, reading={:?}, finished={:?})",
            books.len(),
            filter.name,
            filter.reading,
            filter.finished
        );
        books
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        tracing::debug!("Fetching book id={}", id);
        self.repository.books.get_by_id(id).await
    }

    /// Replace a book's fields; the payload is checked before the id is looked up
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        let (name, payload) = payload.into_validated().map_err(|failure| {
            tracing::warn!("Rejected update of book id={}: {}", id, failure);
            failure
        })?;

        let book = self
            .repository
            .books
            .update(id, name, payload, self.clock.now())
            .await?;

        tracing::info!("Book updated id={}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let remaining = self.repository.books.delete(id).await?;
        tracing::info!("Book deleted id={} ({} on shelf)", id, remaining);
        Ok(())
    }
}
