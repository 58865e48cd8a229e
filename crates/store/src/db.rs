//! SQLite-backed durable store for books and preferences.
//!
//! This module provides the persistence layer with:
//! - A versioned, additive-only schema (`PRAGMA user_version`)
//! - Idempotent migrations, safe to run concurrently from separate contexts
//! - Atomic read-modify-write operations inside IMMEDIATE transactions
//!
//! A [`Store`] wraps a single connection. Contexts do not share handles:
//! each logical operation group opens its own `Store`, and WAL journaling
//! plus a busy timeout provide isolation between concurrent writers.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use crate::{
    Error, Result,
    book::{Book, BookSummary, PREFERENCES_ID, Preferences},
};

/// Current schema version. Migration steps only ever add tables; existing
/// data is never dropped or rewritten.
const SCHEMA_VERSION: i64 = 2;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A context-local connection to the durable store.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at the given path and bring the schema up
    /// to date.
    ///
    /// Safe to call concurrently from multiple contexts: every migration
    /// step is a no-op when the schema is already current.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the database cannot be opened or
    /// the schema cannot be ensured.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::StoreUnavailable(format!("failed to open database: {e}")))?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory store. Used by tests and diagnostics; the
    /// schema is migrated exactly as for an on-disk store.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the connection cannot be set up.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::StoreUnavailable(format!("failed to open database: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| Error::StoreUnavailable(format!("failed to set busy timeout: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| Error::StoreUnavailable(format!("failed to enable WAL: {e}")))?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Bring the schema up to `SCHEMA_VERSION`.
    ///
    /// Every step uses `CREATE TABLE IF NOT EXISTS`, so repeated runs (one
    /// per context opening a connection) are no-ops. v1 databases that
    /// predate the preferences table gain it here without their book rows
    /// being touched.
    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| Error::StoreUnavailable(format!("failed to read schema version: {e}")))?;

        if version < SCHEMA_VERSION {
            self.conn
                .execute(
                    "CREATE TABLE IF NOT EXISTS books (
                        id TEXT PRIMARY KEY,
                        name TEXT NOT NULL,
                        payload BLOB NOT NULL,
                        last_location TEXT
                    )",
                    [],
                )
                .map_err(|e| {
                    Error::StoreUnavailable(format!("failed to create books table: {e}"))
                })?;

            self.conn
                .execute(
                    "CREATE TABLE IF NOT EXISTS preferences (
                        id TEXT PRIMARY KEY,
                        settings TEXT NOT NULL
                    )",
                    [],
                )
                .map_err(|e| {
                    Error::StoreUnavailable(format!("failed to create preferences table: {e}"))
                })?;

            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(|e| {
                    Error::StoreUnavailable(format!("failed to bump schema version: {e}"))
                })?;
        }

        Ok(())
    }

    /// Upsert a book by primary key.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` if the books table is absent, or
    /// `Error::Database` on any other engine failure.
    pub fn put_book(&self, book: &Book) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO books (id, name, payload, last_location)
             VALUES (?1, ?2, ?3, ?4)",
            (&book.id, &book.name, &book.payload, &book.last_location),
        )?;
        Ok(())
    }

    /// Fetch a book by id. Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` or `Error::Database` on engine failure.
    pub fn get_book(&self, id: &str) -> Result<Option<Book>> {
        let book = self
            .conn
            .query_row(
                "SELECT id, name, payload, last_location FROM books WHERE id = ?1",
                [id],
                |row| {
                    Ok(Book {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        payload: row.get(2)?,
                        last_location: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(book)
    }

    /// List all books without materializing payloads. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` or `Error::Database` on engine failure.
    pub fn list_books(&self) -> Result<Vec<BookSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, last_location FROM books")?;
        let rows = stmt.query_map([], |row| {
            Ok(BookSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                last_location: row.get(2)?,
            })
        })?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// Delete a book by id. Deleting an absent id is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` or `Error::Database` on engine failure.
    pub fn delete_book(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM books WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Update a book's last reading location.
    ///
    /// Read and write happen inside one IMMEDIATE transaction, so the update
    /// is atomic with respect to other writers of the same row. If the book
    /// does not exist the operation is a silent no-op and creates nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` or `Error::Database` on engine failure.
    pub fn update_location(&mut self, id: &str, location: &str) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists: Option<String> = tx
            .query_row("SELECT id FROM books WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        if exists.is_some() {
            tx.execute(
                "UPDATE books SET last_location = ?2 WHERE id = ?1",
                (id, location),
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Whether the preferences singleton has been written yet.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMissing` or `Error::Database` on engine failure.
    pub fn preferences_exist(&self) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM preferences WHERE id = ?1)",
            [PREFERENCES_ID],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// The preferences singleton, or an empty map if never written.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the stored JSON is corrupt, or
    /// `Error::SchemaMissing`/`Error::Database` on engine failure.
    pub fn get_preferences(&self) -> Result<Preferences> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT settings FROM preferences WHERE id = ?1",
                [PREFERENCES_ID],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Preferences::new()),
        }
    }

    /// Shallow-merge the given keys over the stored preferences.
    ///
    /// Read, merge and write happen inside one IMMEDIATE transaction; keys
    /// not mentioned in `partial` are preserved.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if stored JSON is corrupt, or
    /// `Error::SchemaMissing`/`Error::Database` on engine failure.
    pub fn merge_preferences(&mut self, partial: &Preferences) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let raw: Option<String> = tx
            .query_row(
                "SELECT settings FROM preferences WHERE id = ?1",
                [PREFERENCES_ID],
                |row| row.get(0),
            )
            .optional()?;
        let mut settings: Preferences = match raw {
            Some(json) => serde_json::from_str(&json)?,
            None => Preferences::new(),
        };

        for (key, value) in partial {
            settings.insert(key.clone(), value.clone());
        }

        let json = serde_json::to_string(&settings)?;
        tx.execute(
            "INSERT OR REPLACE INTO preferences (id, settings) VALUES (?1, ?2)",
            (PREFERENCES_ID, json),
        )?;

        tx.commit()?;
        Ok(())
    }
}
