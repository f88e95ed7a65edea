//! In-process document store.
//!
//! Mirrors the hosted store's contract (ids assigned on add, `replace` is a
//! create-or-overwrite, deleting a missing id succeeds) and records every call
//! so tests can assert exactly what reached the backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::models::{CatalogEntry, EntryDocument, EntryId};
use crate::store::{catalog_order, DocumentStore};

/// A call that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Query { owner_uid: String },
    Add,
    Replace { id: EntryId },
    Delete { id: EntryId },
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<BTreeMap<EntryId, EntryDocument>>,
    calls: Mutex<Vec<StoreCall>>,
    pending_failure: Mutex<Option<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document under a known id without recording a call.
    pub fn insert(&self, id: EntryId, document: EntryDocument) {
        lock(&self.documents).insert(id, document);
    }

    /// Make the next call fail with `message`, as a backend rejection would.
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.pending_failure) = Some(message.into());
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Stored document for `id`, if any.
    pub fn get(&self, id: &EntryId) -> Option<EntryDocument> {
        lock(&self.documents).get(id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.documents).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, call: StoreCall) -> Result<()> {
        lock(&self.calls).push(call);
        match lock(&self.pending_failure).take() {
            Some(message) => Err(Error::Remote(message)),
            None => Ok(()),
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn query_by_owner(&self, owner_uid: &str) -> Result<Vec<CatalogEntry>> {
        self.record(StoreCall::Query {
            owner_uid: owner_uid.to_string(),
        })?;

        let mut entries = lock(&self.documents)
            .iter()
            .filter(|(_, document)| document.owner_uid == owner_uid)
            .map(|(id, document)| CatalogEntry::new(id.clone(), document.clone()))
            .collect::<Vec<_>>();
        entries.sort_by(catalog_order);
        Ok(entries)
    }

    async fn add(&self, document: &EntryDocument) -> Result<EntryId> {
        self.record(StoreCall::Add)?;

        let id = EntryId::new(uuid::Uuid::now_v7().to_string());
        lock(&self.documents).insert(id.clone(), document.clone());
        Ok(id)
    }

    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> Result<()> {
        self.record(StoreCall::Replace { id: id.clone() })?;

        lock(&self.documents).insert(id.clone(), document.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntryId) -> Result<()> {
        self.record(StoreCall::Delete { id: id.clone() })?;

        lock(&self.documents).remove(id);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
