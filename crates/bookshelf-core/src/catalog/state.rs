//! In-memory catalog view state.

use crate::catalog::filter_entries;
use crate::models::{CatalogEntry, EntryId};

/// The authoritative list from the last successful load plus the filtered view.
///
/// `displayed` is always `filter_entries(entries, query)`; every mutation
/// recomputes it in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    entries: Vec<CatalogEntry>,
    displayed: Vec<CatalogEntry>,
    query: String,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly loaded list and re-apply the active query.
    pub fn replace_entries(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
        self.refresh();
    }

    /// Change the active query and recompute the displayed list.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Every loaded entry, in store order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries matching the active query.
    pub fn displayed(&self) -> &[CatalogEntry] {
        &self.displayed
    }

    /// Find a loaded entry by exact id.
    pub fn get(&self, id: &EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    fn refresh(&mut self) {
        self.displayed = filter_entries(&self.entries, Some(&self.query));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDocument;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry::new(
            EntryId::new(id),
            EntryDocument {
                title: title.to_string(),
                ..EntryDocument::default()
            },
        )
    }

    #[test]
    fn query_survives_reload() {
        let mut state = CatalogState::new();
        state.set_query("farm");
        state.replace_entries(vec![entry("1", "Animal Farm"), entry("2", "Meditations")]);

        assert_eq!(state.entries().len(), 2);
        assert_eq!(state.displayed(), &[entry("1", "Animal Farm")]);
    }

    #[test]
    fn clearing_query_shows_everything() {
        let mut state = CatalogState::new();
        state.replace_entries(vec![entry("1", "Animal Farm"), entry("2", "Meditations")]);
        state.set_query("med");
        assert_eq!(state.displayed().len(), 1);

        state.set_query("");
        assert_eq!(state.displayed(), state.entries());
    }

    #[test]
    fn get_finds_by_id() {
        let mut state = CatalogState::new();
        state.replace_entries(vec![entry("1", "Animal Farm")]);
        assert_eq!(
            state.get(&EntryId::new("1")).map(CatalogEntry::title),
            Some("Animal Farm")
        );
        assert!(state.get(&EntryId::new("2")).is_none());
    }
}
