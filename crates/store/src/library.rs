//! The library facade: the single entry point the rest of the application
//! uses to manipulate books and preferences.
//!
//! A [`Library`] holds only the database path. Every operation opens a
//! fresh, short-lived [`Store`] connection, so the facade never assumes a
//! handle survives across unrelated calls and never shares state with the
//! byte-serving context.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    Error, Result,
    book::{Book, BookSummary, Preferences, default_preferences},
    db::Store,
};

/// Display name given to the bundled default book on first-run seeding.
pub const DEFAULT_BOOK_NAME: &str = "Alice's Adventures in Wonderland by Lewis Carroll.epub";

/// Facade over the durable store.
#[derive(Debug, Clone)]
pub struct Library {
    db_path: PathBuf,
}

impl Library {
    /// Create a facade for the store at `db_path`. No connection is opened
    /// until the first operation.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Path of the underlying database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn store(&self) -> Result<Store> {
        Store::open(&self.db_path)
    }

    /// Persist a new book and return its freshly generated id.
    ///
    /// The upload is validated before touching storage: the payload must be
    /// non-empty and the name must carry an `.epub` extension. Ids are
    /// random v4 UUIDs, collision-resistant by construction.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for a rejected upload, or a storage error
    /// from the underlying store.
    pub fn add_book(&self, name: &str, payload: Vec<u8>) -> Result<String> {
        if payload.is_empty() {
            return Err(Error::Validation("uploaded file is empty".to_string()));
        }
        if !name.to_ascii_lowercase().ends_with(".epub") {
            return Err(Error::Validation(format!("not an EPUB file: {name}")));
        }

        let id = Uuid::new_v4().to_string();
        let book = Book {
            id: id.clone(),
            name: name.to_string(),
            payload,
            last_location: None,
        };
        self.store()?.put_book(&book)?;

        tracing::debug!(book = %id, name, "book added");
        Ok(id)
    }

    /// List all stored books, without payloads.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn list_books(&self) -> Result<Vec<BookSummary>> {
        self.store()?.list_books()
    }

    /// Fetch a full book record. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn get_book(&self, id: &str) -> Result<Option<Book>> {
        self.store()?.get_book(id)
    }

    /// Remove a book. Removing an unknown id is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn delete_book(&self, id: &str) -> Result<()> {
        self.store()?.delete_book(id)
    }

    /// Record the reader's position in a book.
    ///
    /// Atomic partial update of `last_location`; a no-op when the book no
    /// longer exists. Position updates are frequent and idempotent, so a
    /// lost update under a rare cross-context race is acceptable.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn update_reading_position(&self, id: &str, position: &str) -> Result<()> {
        self.store()?.update_location(id, position)
    }

    /// The user's preference map, or an empty map if never saved.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn preferences(&self) -> Result<Preferences> {
        self.store()?.get_preferences()
    }

    /// Merge a partial preference set over the stored one.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn save_preferences(&self, partial: &Preferences) -> Result<()> {
        self.store()?.merge_preferences(partial)
    }

    /// First-run seeding: add the bundled default book if the shelf is
    /// empty, and write default preferences if none were ever saved.
    ///
    /// Idempotent, so it can run on every startup. A missing bundled book
    /// only logs a warning; it never blocks startup.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the underlying store.
    pub fn seed_if_empty(&self, default_book: &Path) -> Result<()> {
        let mut store = self.store()?;

        if store.list_books()?.is_empty() {
            match std::fs::read(default_book) {
                Ok(payload) => {
                    let book = Book {
                        id: Uuid::new_v4().to_string(),
                        name: DEFAULT_BOOK_NAME.to_string(),
                        payload,
                        last_location: None,
                    };
                    store.put_book(&book)?;
                    tracing::info!(name = DEFAULT_BOOK_NAME, "seeded default book");
                }
                Err(err) => {
                    tracing::warn!(
                        path = %default_book.display(),
                        "bundled default book not found, skipping seed: {err}"
                    );
                }
            }
        }

        if !store.preferences_exist()? {
            store.merge_preferences(&default_preferences())?;
            tracing::info!("seeded default preferences");
        }

        Ok(())
    }
}
