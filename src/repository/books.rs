//! Book collection storage
//!
//! Books are kept in insertion order behind a single lock; each method
//! acquires it once, so callers never see a partially applied change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookSummary},
};

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book to the end of the collection, returning the new size
    pub async fn insert(&self, book: Book) -> usize {
        let mut books = self.books.write().await;
        books.push(book);
        books.len()
    }

    /// Summaries of the books accepted by `filter`, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary)
            .collect()
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Replace the mutable fields of a book in place
    pub async fn update(
        &self,
        id: &str,
        name: String,
        payload: BookPayload,
        now: DateTime<Utc>,
    ) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        book.apply_update(name, payload, now);
        Ok(book.clone())
    }

    /// Delete book by ID, returning how many books remain
    pub async fn delete(&self, id: &str) -> AppResult<usize> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        books.remove(index);
        Ok(books.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(id: &str, name: &str) -> Book {
        let payload = BookPayload {
            name: Some(name.to_string()),
            publisher: Some("Dicoding".to_string()),
            page_count: Some(Some(10)),
            read_page: Some(Some(1)),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Book::new(id.to_string(), name.to_string(), payload, now)
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = BooksRepository::new();
        repo.insert(sample("b", "Second")).await;
        repo.insert(sample("a", "First")).await;

        let ids: Vec<_> = repo
            .list(&BookFilter::default())
            .await
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_collection_untouched() {
        let repo = BooksRepository::new();
        repo.insert(sample("a", "First")).await;

        let err = repo.delete("missing").await.unwrap_err();
        assert_eq!(err, AppError::NotFound("missing".into()));
        assert_eq!(repo.list(&BookFilter::default()).await.len(), 1);

        assert_eq!(repo.delete("a").await.unwrap(), 0);
        assert!(repo.list(&BookFilter::default()).await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        let repo = BooksRepository::new();
        for i in 0..50 {
            repo.insert(sample(&format!("old-{}", i), &format!("Old {}", i))).await;
        }

        let mut tasks = Vec::new();
        for i in 0..50 {
            let writer = repo.clone();
            tasks.push(tokio::spawn(async move {
                writer.insert(sample(&format!("new-{}", i), &format!("New {}", i))).await;
            }));

            let remover = repo.clone();
            tasks.push(tokio::spawn(async move {
                remover.delete(&format!("old-{}", i)).await.unwrap();
            }));

            let reader = repo.clone();
            tasks.push(tokio::spawn(async move {
                for summary in reader.list(&BookFilter::default()).await {
                    let suffix = summary.id.split_once('-').map(|(_, n)| n.to_string()).unwrap();
                    let expected = if summary.id.starts_with("new-") { "New" } else { "Old" };
                    assert_eq!(summary.name, format!("{} {}", expected, suffix));
                    assert_eq!(summary.publisher.as_deref(), Some("Dicoding"));
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let books = repo.list(&BookFilter::default()).await;
        assert_eq!(books.len(), 50);
        assert!(books.iter().all(|summary| summary.id.starts_with("new-")));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = BooksRepository::new();
        let other = repo.clone();
        repo.insert(sample("a", "First")).await;

        assert_eq!(other.get_by_id("a").await.unwrap().name, "First");
    }
}
