//! Book endpoints: upload, list, metadata, delete, reading position.
//!
//! Payload bytes never travel through these routes on the way out; readers
//! fetch them through the reserved `/epub-local/{id}` path instead.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use folio_store::book::BookSummary;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddBookParams {
    /// Original filename; becomes the display name.
    name: String,
}

#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    location: String,
}

/// GET /api/books - all stored books, payloads omitted.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookSummary>>> {
    let books = state.with_library(|library| library.list_books()).await?;
    Ok(Json(books))
}

/// POST /api/books?name=<filename> - persist an uploaded book.
///
/// The raw request body is the EPUB payload. Validation failures (wrong
/// extension, empty body) come back as 400 before anything is stored.
pub async fn add_book(
    State(state): State<AppState>,
    Query(params): Query<AddBookParams>,
    body: Bytes,
) -> Result<(StatusCode, Json<AddBookResponse>)> {
    let name = params.name;
    let payload = body.to_vec();

    let id = state
        .with_library(move |library| library.add_book(&name, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(AddBookResponse { id })))
}

/// GET /api/books/{id} - book metadata, 404 when absent.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookSummary>> {
    let book = state
        .with_library(move |library| library.get_book(&id))
        .await?;

    book.map(|book| Json(BookSummary::from(book)))
        .ok_or_else(|| AppError::NotFound("no stored book with that id".to_string()))
}

/// DELETE /api/books/{id} - idempotent removal.
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state
        .with_library(move |library| library.delete_book(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/books/{id}/location - record the reading position.
///
/// A silent no-op for unknown ids: position updates race deletions by
/// design, and losing one is harmless.
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<StatusCode> {
    state
        .with_library(move |library| library.update_reading_position(&id, &request.location))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
