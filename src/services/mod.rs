//! Business logic services

pub mod books;
pub mod clock;
pub mod ids;

use std::sync::Arc;

use crate::repository::Repository;

use self::{
    clock::{Clock, SystemClock},
    ids::{IdGenerator, NanoIdGenerator},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services over the given repository with injected time and id sources
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            books: books::BooksService::new(repository, clock, ids),
        }
    }

    /// Services backed by the wall clock and random identifiers
    pub fn with_system_defaults(repository: Repository) -> Self {
        Self::new(repository, Arc::new(SystemClock), Arc::new(NanoIdGenerator))
    }
}
