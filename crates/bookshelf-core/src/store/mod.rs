//! Document store boundary.
//!
//! Every backend speaks the same four calls. Reads are always scoped to a
//! single owner and come back sorted ascending by `extra_field` using plain
//! byte-wise string comparison (ties broken by id), so `"10 min"` sorts before
//! `"2 hours"` and an empty value sorts first.

mod memory;
mod postgrest;

pub use memory::{MemoryDocumentStore, StoreCall};
pub use postgrest::{PostgrestDocumentStore, DEFAULT_COLLECTION};

use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{CatalogEntry, EntryDocument, EntryId};

/// Trait for catalog document storage (async)
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Every entry owned by `owner_uid`, ascending by `extra_field`
    async fn query_by_owner(&self, owner_uid: &str) -> Result<Vec<CatalogEntry>>;

    /// Create a new document and return the identity the store assigned
    async fn add(&self, document: &EntryDocument) -> Result<EntryId>;

    /// Overwrite every field of an existing document
    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> Result<()>;

    /// Remove a document
    async fn delete(&self, id: &EntryId) -> Result<()>;
}

impl<T: DocumentStore> DocumentStore for &T {
    async fn query_by_owner(&self, owner_uid: &str) -> Result<Vec<CatalogEntry>> {
        (**self).query_by_owner(owner_uid).await
    }

    async fn add(&self, document: &EntryDocument) -> Result<EntryId> {
        (**self).add(document).await
    }

    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> Result<()> {
        (**self).replace(id, document).await
    }

    async fn delete(&self, id: &EntryId) -> Result<()> {
        (**self).delete(id).await
    }
}

/// Catalog order: `extra_field` compared as raw text, then id.
pub fn catalog_order(left: &CatalogEntry, right: &CatalogEntry) -> Ordering {
    left.document
        .extra_field
        .as_bytes()
        .cmp(right.document.extra_field.as_bytes())
        .then_with(|| left.id.cmp(&right.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, time: &str) -> CatalogEntry {
        CatalogEntry::new(
            EntryId::new(id),
            EntryDocument {
                extra_field: time.to_string(),
                ..EntryDocument::default()
            },
        )
    }

    #[test]
    fn catalog_order_is_textual_not_numeric() {
        let mut entries = vec![entry("a", "2 hours"), entry("b", "1 hour"), entry("c", "")];
        entries.sort_by(catalog_order);
        let times = entries
            .iter()
            .map(|entry| entry.document.extra_field.as_str())
            .collect::<Vec<_>>();
        assert_eq!(times, vec!["", "1 hour", "2 hours"]);
    }

    #[test]
    fn catalog_order_puts_ten_before_two() {
        let mut entries = vec![entry("a", "2 min"), entry("b", "10 min")];
        entries.sort_by(catalog_order);
        assert_eq!(entries[0].document.extra_field, "10 min");
    }

    #[test]
    fn catalog_order_breaks_ties_by_id() {
        let mut entries = vec![entry("b", "1 hour"), entry("a", "1 hour")];
        entries.sort_by(catalog_order);
        assert_eq!(entries[0].id.as_str(), "a");
    }
}
