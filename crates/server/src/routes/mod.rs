//! REST API routes for the library facade.
//!
//! All routes here are mounted under the `/api` prefix in `server.rs`:
//!
//! - `GET    /api/health` - health check
//! - `GET    /api/books` - list stored books (no payloads)
//! - `POST   /api/books?name=<filename>` - upload a book (raw body)
//! - `GET    /api/books/{id}` - book metadata
//! - `DELETE /api/books/{id}` - remove a book (idempotent)
//! - `PUT    /api/books/{id}/location` - record the reading position
//! - `GET    /api/preferences` - the user preference map
//! - `PATCH  /api/preferences` - merge a partial preference set

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

pub mod books;
pub mod health;
pub mod preferences;

/// Assemble the API router. Relative to the `/api` prefix applied by the
/// caller.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/books", get(books::list_books).post(books::add_book))
        .route(
            "/books/{id}",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/books/{id}/location", put(books::update_location))
        .route(
            "/preferences",
            get(preferences::get_preferences).patch(preferences::save_preferences),
        )
}
