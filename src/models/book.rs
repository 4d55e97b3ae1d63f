//! Book model and its request/response representations.
//!
//! The wire format keeps the Portuguese field names clients already use
//! (`codigo`, `titulo`, `autor`, `dataCadastro`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    /// Assigned by storage on first insert
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    /// Unique across all books
    pub isbn: String,
    /// Set by the service when the book is registered
    pub registered_at: Option<DateTime<Utc>>,
}

impl Book {
    /// A book that has not been stored yet
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            registered_at: None,
        }
    }
}

/// Fields checked by [`BookForm::violations`], in reporting order
const VALIDATED_FIELDS: [&str; 3] = ["title", "author", "isbn"];

/// Create book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    /// Ignored on creation; the server assigns the identifier
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "titulo", default)]
    #[validate(
        required(message = "Título é obrigatório."),
        custom(function = "not_blank", message = "Título é obrigatório.")
    )]
    pub title: Option<String>,
    #[serde(rename = "autor", default)]
    #[validate(
        required(message = "Autor é obrigatório."),
        custom(function = "not_blank", message = "Autor é obrigatório.")
    )]
    pub author: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "ISBN é obrigatório."),
        custom(function = "not_blank", message = "ISBN é obrigatório.")
    )]
    pub isbn: Option<String>,
}

impl BookForm {
    /// Structural validation. Returns one message per failing field, ordered
    /// title, author, isbn. Empty when the form is valid.
    pub fn violations(&self) -> Vec<String> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };
        let field_errors = errors.field_errors();

        VALIDATED_FIELDS
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .filter_map(|errs| errs.first())
            .map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => err.code.to_string(),
            })
            .collect()
    }

    /// Build an unsaved book from a validated form. `codigo` is dropped.
    pub fn into_book(self) -> Book {
        Book::new(
            self.title.unwrap_or_default(),
            self.author.unwrap_or_default(),
            self.isbn.unwrap_or_default(),
        )
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Book as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    #[serde(rename = "codigo")]
    pub id: Option<i64>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "dataCadastro")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            registered_at: book.registered_at,
        }
    }
}
