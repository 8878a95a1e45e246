//! # Entity Model
//!
//! The Book record shape and its companion payload types.
//!
//! `Book` is the stored record. `NewBook` is a validated creation payload
//! (no id; the store assigns one). `BookPatch` is a partial update where
//! only provided fields overwrite the stored record.

use serde::{Deserialize, Serialize};

/// Maximum length of `title` and `author` in characters
pub const MAX_NAME_LEN: usize = 100;

/// A stored book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// System-assigned identifier, immutable once set
    pub id: i64,

    /// Title, 1-100 characters
    pub title: String,

    /// Author, 1-100 characters
    pub author: String,

    /// Publication date as `YYYY-MM-DD`, pattern-checked only
    pub published_date: Option<String>,

    /// Free-text summary, unbounded
    pub summary: Option<String>,
}

/// A validated creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: Option<String>,
    pub summary: Option<String>,
}

impl NewBook {
    /// Attach a store-assigned id, producing the stored record
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            published_date: self.published_date,
            summary: self.summary,
        }
    }
}

/// A partial update; `None` means "leave the stored value unchanged"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
    pub summary: Option<String>,
}

impl BookPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_date.is_none()
            && self.summary.is_none()
    }

    /// Merge this patch into an existing record, leaving `id` untouched
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(date) = &self.published_date {
            book.published_date = Some(date.clone());
        }
        if let Some(summary) = &self.summary {
            book.summary = Some(summary.clone());
        }
    }
}
