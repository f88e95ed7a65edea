//! Catalog entry model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Link opened by "try it" when an entry carries no url of its own.
pub const DEFAULT_ENTRY_LINK: &str = "https://www.goodreads.com/";

/// Opaque document identity assigned by the store.
///
/// Stores hand these out on create; the client never invents or parses them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap a store-issued identity.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse user-supplied text into an id, rejecting blank input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id begins with the given prefix.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The complete field set of a stored entry, without its identity.
///
/// Writes always send the whole document: `replace` overwrites every field,
/// so a value left at its default here becomes the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDocument {
    pub title: String,
    /// Author
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    /// Absolute cover URL or a symbolic cover key such as `book3`
    #[serde(default)]
    pub image_ref: String,
    /// Free-text reading time; also the catalog sort key (compared as text)
    #[serde(default)]
    pub extra_field: String,
    pub owner_uid: String,
}

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    #[serde(flatten)]
    pub document: EntryDocument,
}

impl CatalogEntry {
    #[must_use]
    pub const fn new(id: EntryId, document: EntryDocument) -> Self {
        Self { id, document }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.document.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.document.subtitle
    }

    /// Reading time as typed by the user.
    #[must_use]
    pub fn reading_time(&self) -> &str {
        &self.document.extra_field
    }

    /// The entry's own link, or the catalog-wide default when unset.
    #[must_use]
    pub fn link_or_default(&self) -> &str {
        let url = self.document.url.trim();
        if url.is_empty() {
            DEFAULT_ENTRY_LINK
        } else {
            url
        }
    }

    /// Text handed to a share target.
    #[must_use]
    pub fn share_text(&self) -> String {
        format!("Check out this book: {}", self.document.title)
    }
}
