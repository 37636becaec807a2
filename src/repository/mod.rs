//! Repository layer holding the in-memory book collection

pub mod books;

/// Main repository struct; clones share the same underlying collections
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository with an empty collection
    pub fn new() -> Self {
        Self::default()
    }
}
