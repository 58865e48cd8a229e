//! Byte-serving endpoint: resolves `/epub-local/{id}` to stored book bytes.
//!
//! This is the offline analog of a network fetch: the renderer asks for a
//! book by URL and gets the raw payload back from durable storage, with no
//! network round-trip. The handler opens its own store connection per
//! request (running the idempotent schema migrations as needed), so it
//! never depends on the facade context's state.
//!
//! Every branch resolves to a response:
//! empty id -> 400, store unreachable -> 503, schema skew or lookup failure
//! -> 500, unknown id -> 404, found -> 200 with the payload passed through
//! unchanged (the consumer infers the content type).

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use folio_store::db::Store;
use tokio::task;

use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// GET /epub-local/{id} — serve the stored payload for a book.
pub async fn serve_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    if id.is_empty() {
        return Err(AppError::BadRequest("no book id in request path".to_string()));
    }

    let db_path = state.db_path.clone();
    let book = task::spawn_blocking(move || {
        // Independent connection: this context may race the facade's
        // writes, so the open path re-validates the schema.
        let store = Store::open(&db_path)?;
        store.get_book(&id)
    })
    .await
    .map_err(|e| AppError::Internal(format!("storage task failed: {e}")))??;

    match book {
        Some(book) => {
            tracing::debug!(name = %book.name, "serving stored book");
            Ok(book.payload.into_response())
        }
        None => Err(AppError::NotFound(
            "no stored book with that id".to_string(),
        )),
    }
}

/// GET /epub-local and /epub-local/ — the id segment is required.
pub async fn missing_id() -> AppError {
    AppError::BadRequest("no book id in request path".to_string())
}
