//! Record types held by the durable store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed primary key of the preferences singleton row.
pub const PREFERENCES_ID: &str = "user";

/// A stored book: an opaque EPUB payload plus reading metadata.
///
/// `id` and `payload` are immutable after creation; only `last_location`
/// changes over the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub payload: Vec<u8>,
    /// Opaque position fingerprint; its format is owned by the renderer.
    pub last_location: Option<String>,
}

/// Listing view of a book, without materializing the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub last_location: Option<String>,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            last_location: book.last_location,
        }
    }
}

/// Open-ended mapping of setting name to value (theme, font size, ...).
///
/// Updates to this map are shallow merges: a partial update never erases
/// keys it does not mention.
pub type Preferences = serde_json::Map<String, Value>;

/// Preference set written on first-run seeding.
pub fn default_preferences() -> Preferences {
    let mut settings = Preferences::new();
    settings.insert("theme".to_string(), Value::from("light"));
    settings.insert("fontSize".to_string(), Value::from(16));
    settings.insert("lineHeight".to_string(), Value::from(1.5));
    settings.insert("fontFamily".to_string(), Value::from("Georgia, serif"));
    settings.insert("showBookCover".to_string(), Value::from(true));
    settings
}
