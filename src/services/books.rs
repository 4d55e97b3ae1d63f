//! Book registration service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::BookRepository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Arc<dyn BookRepository>,
}

impl BooksService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Register a book. Fails with `DuplicateIsbn` when the ISBN is already
    /// stored, in which case nothing is written.
    pub async fn save(&self, mut book: Book) -> AppResult<Book> {
        if self.repository.exists_by_isbn(&book.isbn).await? {
            tracing::warn!("Book creation rejected: ISBN {} already registered", book.isbn);
            return Err(AppError::DuplicateIsbn);
        }

        book.registered_at = Some(Utc::now());
        let saved = self.repository.save(book).await?;

        tracing::info!("Book registered: id={:?} isbn={}", saved.id, saved.isbn);
        Ok(saved)
    }
}
