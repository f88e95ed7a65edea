//! Flat key-value payload passed from the detail view to the editor.

use serde::{Deserialize, Serialize};

use crate::models::{CatalogEntry, EntryId};

pub const KEY_BOOK_ID: &str = "BOOK_ID";
pub const KEY_TITLE: &str = "TITLE";
pub const KEY_AUTHOR: &str = "AUTHOR";
pub const KEY_DESC: &str = "DESC";
pub const KEY_TIME: &str = "TIME";
pub const KEY_URL: &str = "URL";
pub const KEY_IMAGE_REF: &str = "IMAGE_REF";

/// Every field of an entry, keyed the way screens exchange them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHandoff {
    #[serde(rename = "BOOK_ID", default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<EntryId>,
    #[serde(rename = "TITLE", default)]
    pub title: String,
    #[serde(rename = "AUTHOR", default)]
    pub author: String,
    #[serde(rename = "DESC", default)]
    pub description: String,
    #[serde(rename = "TIME", default)]
    pub time: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "IMAGE_REF", default)]
    pub image_ref: String,
}

impl EntryHandoff {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            book_id: Some(entry.id.clone()),
            title: entry.document.title.clone(),
            author: entry.document.subtitle.clone(),
            description: entry.document.description.clone(),
            time: entry.document.extra_field.clone(),
            url: entry.document.url.clone(),
            image_ref: entry.document.image_ref.clone(),
        }
    }

    /// Payload as ordered key-value pairs. `BOOK_ID` is omitted when unset.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(id) = &self.book_id {
            pairs.push((KEY_BOOK_ID, id.to_string()));
        }
        pairs.extend([
            (KEY_TITLE, self.title.clone()),
            (KEY_AUTHOR, self.author.clone()),
            (KEY_DESC, self.description.clone()),
            (KEY_TIME, self.time.clone()),
            (KEY_URL, self.url.clone()),
            (KEY_IMAGE_REF, self.image_ref.clone()),
        ]);
        pairs
    }

    /// Rebuild a payload from pairs. Missing keys read as empty and unknown
    /// keys are ignored; a blank `BOOK_ID` counts as absent.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut handoff = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                KEY_BOOK_ID => handoff.book_id = EntryId::parse(&value),
                KEY_TITLE => handoff.title = value,
                KEY_AUTHOR => handoff.author = value,
                KEY_DESC => handoff.description = value,
                KEY_TIME => handoff.time = value,
                KEY_URL => handoff.url = value,
                KEY_IMAGE_REF => handoff.image_ref = value,
                _ => {}
            }
        }
        handoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDocument;
    use pretty_assertions::assert_eq;

    fn entry() -> CatalogEntry {
        CatalogEntry::new(
            EntryId::new("doc-7"),
            EntryDocument {
                title: "Letters from a Stoic".to_string(),
                subtitle: "Seneca".to_string(),
                description: "Moral letters".to_string(),
                url: String::new(),
                image_ref: "book8".to_string(),
                extra_field: "5 hours".to_string(),
                owner_uid: "u1".to_string(),
            },
        )
    }

    #[test]
    fn pairs_use_screen_keys() {
        let pairs = EntryHandoff::from_entry(&entry()).to_pairs();
        let keys = pairs.iter().map(|(key, _)| *key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec!["BOOK_ID", "TITLE", "AUTHOR", "DESC", "TIME", "URL", "IMAGE_REF"]
        );
        assert_eq!(pairs[2].1, "Seneca");
    }

    #[test]
    fn from_pairs_tolerates_missing_and_unknown_keys() {
        let handoff = EntryHandoff::from_pairs([
            ("TITLE", "Animal Farm"),
            ("EXTRA", "ignored"),
            ("BOOK_ID", "  "),
        ]);
        assert_eq!(handoff.title, "Animal Farm");
        assert_eq!(handoff.book_id, None);
        assert_eq!(handoff.author, "");
    }

    #[test]
    fn json_uses_upper_case_keys() {
        let value = serde_json::to_value(EntryHandoff::from_entry(&entry())).unwrap();
        assert_eq!(value["BOOK_ID"], "doc-7");
        assert_eq!(value["TIME"], "5 hours");
        assert_eq!(value["IMAGE_REF"], "book8");
    }
}
