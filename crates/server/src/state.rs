//! Shared router state.

use std::path::PathBuf;

use folio_store::library::Library;
use tokio::task;

use crate::error::{AppError, Result};

/// State shared by all routes. Holds paths, not connections: every handler
/// opens its own short-lived store connection.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub library: Library,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        let library = Library::new(db_path.clone());
        Self { db_path, library }
    }

    /// Run a blocking facade operation off the async runtime.
    ///
    /// # Errors
    ///
    /// Returns the facade's error mapped to an [`AppError`], or
    /// `AppError::Internal` if the blocking task itself fails.
    pub async fn with_library<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Library) -> folio_store::Result<T> + Send + 'static,
    {
        let library = self.library.clone();
        task::spawn_blocking(move || op(&library))
            .await
            .map_err(|e| AppError::Internal(format!("storage task failed: {e}")))?
            .map_err(AppError::from)
    }
}
