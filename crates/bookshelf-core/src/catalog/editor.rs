//! Entry form and the create-or-replace save flow.

use crate::error::{Error, Result};
use crate::handoff::EntryHandoff;
use crate::models::{CatalogEntry, Cover, EntryDocument, EntryId};
use crate::session::SessionProvider;
use crate::store::DocumentStore;

const QUICK_ADD_TITLE: &str = "New Book Entry";
const QUICK_ADD_TIME: &str = "1 hour";

/// Editable fields of an entry, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub title: String,
    pub author: String,
    pub description: String,
    pub time: String,
    pub url: String,
    /// Remote cover URL; takes precedence over `cover` when non-empty
    pub image_url: String,
    pub cover: Cover,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            time: String::new(),
            url: String::new(),
            image_url: String::new(),
            cover: Cover::DEFAULT,
        }
    }
}

impl EntryForm {
    /// Form prefilled with the quick-add preset.
    #[must_use]
    pub fn quick_add() -> Self {
        Self {
            title: QUICK_ADD_TITLE.to_string(),
            time: QUICK_ADD_TIME.to_string(),
            ..Self::default()
        }
    }

    /// Prefill from a detail-view payload.
    ///
    /// The image URL field only receives references that look like URLs; a
    /// symbolic reference selects its cover instead, so saving an untouched
    /// form keeps the stored cover rather than resetting it to `book1`.
    #[must_use]
    pub fn from_handoff(handoff: &EntryHandoff) -> Self {
        let (image_url, cover) = if handoff.image_ref.starts_with("http") {
            (handoff.image_ref.clone(), Cover::DEFAULT)
        } else {
            (
                String::new(),
                Cover::from_key(handoff.image_ref.trim()).unwrap_or(Cover::DEFAULT),
            )
        };

        Self {
            title: handoff.title.clone(),
            author: handoff.author.clone(),
            description: handoff.description.clone(),
            time: handoff.time.clone(),
            url: handoff.url.clone(),
            image_url,
            cover,
        }
    }

    #[must_use]
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self::from_handoff(&EntryHandoff::from_entry(entry))
    }

    /// Copy of the form with every text field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: self.description.trim().to_string(),
            time: self.time.trim().to_string(),
            url: self.url.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            cover: self.cover,
        }
    }

    /// Check the required fields of an already trimmed form.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("title", &self.title),
            ("author", &self.author),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(missing))
        }
    }

    /// Value stored in `image_ref`: the URL verbatim, else the cover key.
    #[must_use]
    pub fn image_ref(&self) -> String {
        if self.image_url.is_empty() {
            self.cover.key().to_string()
        } else {
            self.image_url.clone()
        }
    }

    /// Complete document for `owner_uid`.
    #[must_use]
    pub fn to_document(&self, owner_uid: &str) -> EntryDocument {
        EntryDocument {
            title: self.title.clone(),
            subtitle: self.author.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            image_ref: self.image_ref(),
            extra_field: self.time.clone(),
            owner_uid: owner_uid.to_string(),
        }
    }
}

/// What a successful save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(EntryId),
    Updated(EntryId),
}

impl SaveOutcome {
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Saves forms to the store on behalf of the signed-in user.
pub struct EntryEditor<S, P> {
    store: S,
    session: P,
}

impl<S: DocumentStore, P: SessionProvider> EntryEditor<S, P> {
    pub const fn new(store: S, session: P) -> Self {
        Self { store, session }
    }

    /// Create a new entry, or fully replace `existing_id` when given.
    ///
    /// Validation and the session check both run before any store call. A
    /// blank `existing_id` is rejected rather than written under that key.
    pub async fn save(&self, existing_id: Option<&EntryId>, form: &EntryForm) -> Result<SaveOutcome> {
        let form = form.trimmed();
        form.validate()?;

        let uid = self.session.current_uid().ok_or(Error::SignInRequired)?;
        if existing_id.is_some_and(|id| id.as_str().trim().is_empty()) {
            return Err(Error::MissingEntryId);
        }
        let document = form.to_document(&uid);

        match existing_id {
            Some(id) => {
                self.store.replace(id, &document).await?;
                tracing::info!("Replaced entry {id}");
                Ok(SaveOutcome::Updated(id.clone()))
            }
            None => {
                let id = self.store.add(&document).await?;
                tracing::info!("Created entry {id}");
                Ok(SaveOutcome::Created(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FixedSession;
    use crate::store::{MemoryDocumentStore, StoreCall};
    use pretty_assertions::assert_eq;

    fn filled_form() -> EntryForm {
        EntryForm {
            title: "  Meditations ".to_string(),
            author: " Marcus Aurelius".to_string(),
            description: "Notes to self  ".to_string(),
            time: " 3 hours ".to_string(),
            url: String::new(),
            image_url: String::new(),
            cover: Cover::Book4,
        }
    }

    #[tokio::test]
    async fn new_form_creates_one_trimmed_document() {
        let store = MemoryDocumentStore::new();
        let editor = EntryEditor::new(&store, FixedSession::signed_in("u1"));

        let outcome = editor.save(None, &filled_form()).await.unwrap();
        let SaveOutcome::Created(id) = outcome else {
            panic!("expected a created entry");
        };

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&id).unwrap(),
            EntryDocument {
                title: "Meditations".to_string(),
                subtitle: "Marcus Aurelius".to_string(),
                description: "Notes to self".to_string(),
                url: String::new(),
                image_ref: "book4".to_string(),
                extra_field: "3 hours".to_string(),
                owner_uid: "u1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn existing_id_replaces_every_field() {
        let store = MemoryDocumentStore::new();
        let id = EntryId::new("doc-1");
        store.insert(
            id.clone(),
            EntryDocument {
                title: "Old".to_string(),
                subtitle: "Old Author".to_string(),
                description: "kept?".to_string(),
                url: "https://example.com/old".to_string(),
                image_ref: "https://example.com/cover.png".to_string(),
                extra_field: "1 hour".to_string(),
                owner_uid: "u1".to_string(),
            },
        );
        let editor = EntryEditor::new(&store, FixedSession::signed_in("u1"));

        let mut form = filled_form();
        form.description = String::new();
        let outcome = editor.save(Some(&id), &form).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Updated(id.clone()));
        let stored = store.get(&id).unwrap();
        assert_eq!(stored.description, "");
        assert_eq!(stored.url, "");
        assert_eq!(stored.image_ref, "book4");
        assert_eq!(store.calls(), vec![StoreCall::Replace { id }]);
    }

    #[tokio::test]
    async fn blank_required_field_never_reaches_store() {
        let store = MemoryDocumentStore::new();
        let editor = EntryEditor::new(&store, FixedSession::signed_in("u1"));

        let mut form = filled_form();
        form.time = "   ".to_string();
        let error = editor.save(None, &form).await.unwrap_err();

        assert!(matches!(error, Error::Validation(ref fields) if fields == &vec!["time"]));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn signed_out_save_never_reaches_store() {
        let store = MemoryDocumentStore::new();
        let editor = EntryEditor::new(&store, FixedSession::signed_out());

        let error = editor.save(None, &filled_form()).await.unwrap_err();
        assert!(matches!(error, Error::SignInRequired));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_existing_id_never_reaches_store() {
        let store = MemoryDocumentStore::new();
        let editor = EntryEditor::new(&store, FixedSession::signed_in("u1"));

        let error = editor
            .save(Some(&EntryId::new("  ")), &filled_form())
            .await
            .unwrap_err();
        assert!(matches!(error, Error::MissingEntryId));
        assert!(store.calls().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_returned() {
        let store = MemoryDocumentStore::new();
        store.fail_next("row-level security violation");
        let editor = EntryEditor::new(&store, FixedSession::signed_in("u1"));

        let error = editor.save(None, &filled_form()).await.unwrap_err();
        assert_eq!(error.backend_message(), "row-level security violation");
        assert!(store.is_empty());
    }

    #[test]
    fn image_url_wins_over_cover() {
        let mut form = filled_form().trimmed();
        form.image_url = "https://covers.example.com/1.jpg".to_string();
        assert_eq!(form.image_ref(), "https://covers.example.com/1.jpg");
    }

    #[test]
    fn quick_add_preset() {
        let form = EntryForm::quick_add();
        assert_eq!(form.title, "New Book Entry");
        assert_eq!(form.time, "1 hour");
        assert_eq!(form.cover, Cover::Book1);
    }

    #[test]
    fn prefill_routes_image_reference() {
        let mut handoff = EntryHandoff {
            image_ref: "book6".to_string(),
            ..EntryHandoff::default()
        };
        let form = EntryForm::from_handoff(&handoff);
        assert_eq!(form.cover, Cover::Book6);
        assert_eq!(form.image_url, "");

        handoff.image_ref = "https://covers.example.com/2.jpg".to_string();
        let form = EntryForm::from_handoff(&handoff);
        assert_eq!(form.image_url, "https://covers.example.com/2.jpg");

        handoff.image_ref = "book42".to_string();
        assert_eq!(EntryForm::from_handoff(&handoff).cover, Cover::DEFAULT);
    }
}
