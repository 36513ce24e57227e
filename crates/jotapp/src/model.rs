//! # Domain Model
//!
//! An [`Entry`] is a titled markdown document. The store treats it as a value: it
//! assigns the `id`, stamps `updated`, and otherwise persists what it is given.
//!
//! ## Serialized Form
//!
//! The metadata file is the JSON form of an entry:
//!
//! ```text
//! {"ID":"20240105093012","Title":"Groceries","Markdown":"- eggs\n- milk","Updated":"2024-01-05T09:30:12Z"}
//! ```
//!
//! The `Markdown` field is written for completeness but never trusted on read: the
//! content file next to it is authoritative and replaces it when an entry is loaded.
//! `Updated` is optional so metadata written without it still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Markdown", default)]
    pub markdown: String,
    #[serde(rename = "Updated", default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Entry {
    /// A not-yet-stored entry. The id stays empty until one is assigned.
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            markdown: markdown.into(),
            updated: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// One entry's contribution to a search: every matching line, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub id: String,
    pub title: String,
    pub lines: Vec<String>,
}

/// A superseded version sitting in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedVersion {
    pub id: String,
    /// Archival timestamp, possibly with a `-N` disambiguation suffix.
    pub archived_at: String,
    /// Base file name (no extension) inside the archive directory.
    pub name: String,
}
