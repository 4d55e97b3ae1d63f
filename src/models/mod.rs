//! Data models for the Loan Library

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookForm, BookResponse};
