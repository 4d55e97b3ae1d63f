//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookForm, BookResponse},
};

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book registered", body = BookResponse),
        (status = 400, description = "Invalid input or ISBN already registered", body = crate::error::ApiErrors)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(form), _): WithRejection<Json<BookForm>, AppError>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let violations = form.violations();
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let book = state.services.books.save(form.into_book()).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}
