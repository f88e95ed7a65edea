//! Confirmed single-entry deletion.

use crate::error::{Error, Result};
use crate::models::EntryId;
use crate::store::DocumentStore;

/// Asks the user whether an entry should really be deleted.
pub trait Confirmation {
    fn confirm(&mut self, id: &EntryId) -> bool;
}

impl<F: FnMut(&EntryId) -> bool> Confirmation for F {
    fn confirm(&mut self, id: &EntryId) -> bool {
        self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(EntryId),
    Cancelled,
}

pub struct EntryDeletion<S> {
    store: S,
}

impl<S: DocumentStore> EntryDeletion<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Delete `id` once `confirmation` agrees.
    ///
    /// A missing or blank id fails before the user is asked; a declined
    /// confirmation makes no store call.
    pub async fn delete(
        &self,
        id: Option<&EntryId>,
        mut confirmation: impl Confirmation,
    ) -> Result<DeleteOutcome> {
        let id = id
            .filter(|id| !id.as_str().trim().is_empty())
            .ok_or(Error::MissingEntryId)?;

        if !confirmation.confirm(id) {
            tracing::debug!("Deletion of {id} cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.delete(id).await?;
        tracing::info!("Deleted entry {id}");
        Ok(DeleteOutcome::Deleted(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDocument;
    use crate::store::{MemoryDocumentStore, StoreCall};
    use pretty_assertions::assert_eq;

    fn seeded() -> (MemoryDocumentStore, EntryId) {
        let store = MemoryDocumentStore::new();
        let id = EntryId::new("doc-1");
        store.insert(
            id.clone(),
            EntryDocument {
                title: "Animal Farm".to_string(),
                owner_uid: "u1".to_string(),
                ..EntryDocument::default()
            },
        );
        (store, id)
    }

    #[tokio::test]
    async fn confirmed_delete_removes_entry_from_next_query() {
        let (store, id) = seeded();
        let deletion = EntryDeletion::new(&store);

        let outcome = deletion.delete(Some(&id), |_: &EntryId| true).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(id.clone()));

        let remaining = store.query_by_owner("u1").await.unwrap();
        assert!(remaining.iter().all(|entry| entry.id != id));
    }

    #[tokio::test]
    async fn missing_id_makes_no_store_calls() {
        let (store, _) = seeded();
        let deletion = EntryDeletion::new(&store);
        let mut asked = false;

        let error = deletion
            .delete(None, |_: &EntryId| {
                asked = true;
                true
            })
            .await
            .unwrap_err();
        assert!(matches!(error, Error::MissingEntryId));
        assert!(!asked);

        let blank = EntryId::new(" ");
        let error = deletion
            .delete(Some(&blank), |_: &EntryId| true)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::MissingEntryId));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_confirmation_cancels() {
        let (store, id) = seeded();
        let deletion = EntryDeletion::new(&store);

        let outcome = deletion.delete(Some(&id), |_: &EntryId| false).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(store.calls().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_returned() {
        let (store, id) = seeded();
        store.fail_next("permission denied");
        let deletion = EntryDeletion::new(&store);

        let error = deletion.delete(Some(&id), |_: &EntryId| true).await.unwrap_err();
        assert_eq!(error.backend_message(), "permission denied");
        assert_eq!(store.calls(), vec![StoreCall::Delete { id }]);
    }
}
