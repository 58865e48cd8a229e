use thiserror::Error;

/// Errors produced by the durable store and the library facade.
///
/// Record absence is not an error; lookups return `Ok(None)` instead.
/// `StoreUnavailable` and `SchemaMissing` are kept distinct so that a
/// connection failure can be told apart from schema version skew between
/// execution contexts.
#[derive(Debug, Error)]
pub enum Error {
    /// The storage medium could not be opened at all.
    #[error("storage unavailable: {0}")]
    StoreUnavailable(String),

    /// An expected table is absent (schema upgrade not yet run in this
    /// context, or version skew between contexts).
    #[error("schema missing: {0}")]
    SchemaMissing(String),

    /// Any other storage engine failure.
    #[error("database error: {0}")]
    Database(String),

    /// Input rejected at the boundary before touching storage.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failure, e.g. while reading the bundled default book.
    #[error("io error: {0}")]
    Io(String),

    /// JSON encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if is_missing_table(&err) {
            Self::SchemaMissing(err.to_string())
        } else {
            Self::Database(err.to_string())
        }
    }
}

/// SQLite reports a missing table as a generic error with a recognizable
/// message; there is no dedicated error code for it.
fn is_missing_table(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.starts_with("no such table")
    )
}
