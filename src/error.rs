//! Error types for the Loan Library server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when a book's ISBN is already registered
pub const DUPLICATE_ISBN_MESSAGE: &str = "ISBN já cadastrado.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// One message per field that failed structural validation
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("ISBN já cadastrado.")]
    DuplicateIsbn,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApiErrors {
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            AppError::DuplicateIsbn => (
                StatusCode::BAD_REQUEST,
                vec![DUPLICATE_ISBN_MESSAGE.to_string()],
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, vec![msg]),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, vec![msg]),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["Database error".to_string()],
                )
            }
        };

        (status, Json(ApiErrors { errors })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
