//! Title filter over the loaded catalog.

use crate::models::CatalogEntry;

/// Entries whose title contains `query`, ignoring case, in their original order.
///
/// `None` and the empty string both mean "no filter". The query is matched as
/// typed: surrounding whitespace is significant.
pub fn filter_entries(entries: &[CatalogEntry], query: Option<&str>) -> Vec<CatalogEntry> {
    let Some(query) = query.filter(|query| !query.is_empty()) else {
        return entries.to_vec();
    };

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.title().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDocument, EntryId};
    use pretty_assertions::assert_eq;

    fn entries(titles: &[&str]) -> Vec<CatalogEntry> {
        titles
            .iter()
            .enumerate()
            .map(|(index, title)| {
                CatalogEntry::new(
                    EntryId::new(format!("id-{index}")),
                    EntryDocument {
                        title: (*title).to_string(),
                        subtitle: "Stoic Author".to_string(),
                        ..EntryDocument::default()
                    },
                )
            })
            .collect()
    }

    fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(CatalogEntry::title).collect()
    }

    #[test]
    fn empty_or_missing_query_returns_everything() {
        let all = entries(&["Meditations", "Animal Farm", "The Alchemist"]);
        assert_eq!(filter_entries(&all, None), all);
        assert_eq!(filter_entries(&all, Some("")), all);
    }

    #[test]
    fn match_is_case_insensitive_and_keeps_order() {
        let all = entries(&["The Alchemist", "Meditations", "Letters from a Stoic", "THE END"]);
        let filtered = filter_entries(&all, Some("the"));
        assert_eq!(titles(&filtered), vec!["The Alchemist", "THE END"]);
    }

    #[test]
    fn only_title_is_searched() {
        let all = entries(&["Meditations"]);
        assert!(filter_entries(&all, Some("stoic")).is_empty());
    }

    #[test]
    fn whitespace_in_query_is_significant() {
        let all = entries(&["Animal Farm", "Farmhouse"]);
        let filtered = filter_entries(&all, Some(" farm"));
        assert_eq!(titles(&filtered), vec!["Animal Farm"]);
    }
}
