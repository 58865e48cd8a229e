//! # Folio Server
//!
//! The HTTP layer of the folio e-book shelf:
//!
//! - the **byte-serving endpoint** under the reserved `/epub-local/` prefix,
//!   which resolves a book id to its stored payload from an independent
//!   store connection (the renderer loads stored books by URL instead of
//!   holding their bytes in memory), and
//! - the **library API** under `/api`, a thin REST surface over the
//!   [`folio_store::library::Library`] facade.
//!
//! Every failure branch resolves to a well-formed response; handlers never
//! panic and never leave a request hanging.

pub mod error;
pub mod offline;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod router_tests;

pub use error::{AppError, Result};
pub use state::AppState;
