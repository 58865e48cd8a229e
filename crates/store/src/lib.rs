//! # Folio Store
//!
//! Durable storage for the folio e-book shelf: a versioned SQLite database
//! holding two collections (books and user preferences), plus the library
//! facade the rest of the application goes through.
//!
//! Connections are cheap and context-local: every execution context (the API
//! handlers, the byte-serving endpoint) opens its own [`db::Store`] per
//! logical operation instead of sharing a handle. Schema migrations are
//! idempotent, so concurrent opens from separate contexts are safe.
//!
//! All fallible operations return [`Result`]; record absence is `Ok(None)`,
//! never an error.

pub mod book;
pub mod db;
mod error;
pub mod library;
mod result;

pub use error::Error;
pub use result::Result;
