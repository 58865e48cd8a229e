//! Result type alias for store operations.

use crate::error::Error;

/// The standard Result type for folio storage operations.
///
/// All fallible operations in this crate return this type; propagate with
/// the `?` operator or handle with `match`/combinators.
pub type Result<T> = std::result::Result<T, Error>;
