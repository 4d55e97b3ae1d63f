//! PostgreSQL books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, registered_at)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING id, title, author, isbn, registered_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn update(&self, id: i64, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, isbn = $3,
                registered_at = COALESCE($4, registered_at)
            WHERE id = $5
            RETURNING id, title, author, isbn, registered_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.registered_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }
}

#[async_trait]
impl BookRepository for PgBooksRepository {
    async fn save(&self, book: Book) -> AppResult<Book> {
        match book.id {
            Some(id) => self.update(id, &book).await,
            None => self.insert(&book).await,
        }
    }

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

/// The `books_isbn_key` constraint backs the service's existence check when
/// two requests race on the same ISBN.
fn storage_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::DuplicateIsbn,
        _ => AppError::Database(err),
    }
}
