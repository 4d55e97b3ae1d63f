//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::book::Book};

pub use books::PgBooksRepository;
pub use memory::InMemoryBooksRepository;

/// Storage access for books. Any engine that can insert, read back and
/// answer an existence query by ISBN can back the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert the book when it has no id yet, otherwise update the stored
    /// record. Returns the persisted entity with its id.
    async fn save(&self, book: Book) -> AppResult<Book>;

    /// Whether any stored book carries this ISBN
    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool>;
}

/// Main repository struct handed to the services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBooksRepository::new(pool)),
        }
    }

    /// Create a repository backed by process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(InMemoryBooksRepository::default()),
        }
    }
}
