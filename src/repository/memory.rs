//! In-memory books repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Default)]
struct Store {
    last_id: i64,
    books: BTreeMap<i64, Book>,
}

impl Store {
    fn isbn_taken(&self, isbn: &str, except: Option<i64>) -> bool {
        self.books
            .values()
            .any(|b| b.isbn == isbn && b.id != except)
    }
}

/// Books kept in process memory. Uniqueness of ISBN is checked under the
/// same lock as the insert, so concurrent saves cannot both succeed.
#[derive(Default)]
pub struct InMemoryBooksRepository {
    store: Mutex<Store>,
}

#[async_trait]
impl BookRepository for InMemoryBooksRepository {
    async fn save(&self, mut book: Book) -> AppResult<Book> {
        let mut store = self.store.lock().await;

        if store.isbn_taken(&book.isbn, book.id) {
            return Err(AppError::DuplicateIsbn);
        }

        match book.id {
            Some(id) => {
                let existing = store
                    .books
                    .get(&id)
                    .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
                if book.registered_at.is_none() {
                    book.registered_at = existing.registered_at;
                }
            }
            None => {
                store.last_id += 1;
                book.id = Some(store.last_id);
            }
        }

        if let Some(id) = book.id {
            store.books.insert(id, book.clone());
        }
        Ok(book)
    }

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        Ok(self.store.lock().await.isbn_taken(isbn, None))
    }
}
