//! Owner-scoped catalog reload.

use crate::catalog::CatalogState;
use crate::error::{Error, Result};
use crate::session::SessionProvider;
use crate::store::DocumentStore;

/// Pulls the signed-in user's entries and replaces the in-memory list.
pub struct CatalogLoader<S, P> {
    store: S,
    session: P,
}

impl<S: DocumentStore, P: SessionProvider> CatalogLoader<S, P> {
    pub const fn new(store: S, session: P) -> Self {
        Self { store, session }
    }

    /// Fetch every entry owned by the current user.
    ///
    /// On success the state's list is replaced wholesale and the displayed
    /// list is recomputed with the active query. On failure the state is left
    /// exactly as it was. Returns the number of loaded entries.
    pub async fn reload(&self, state: &mut CatalogState) -> Result<usize> {
        let uid = self.session.current_uid().ok_or(Error::SignInRequired)?;

        match self.store.query_by_owner(&uid).await {
            Ok(entries) => {
                let count = entries.len();
                state.replace_entries(entries);
                tracing::info!("Loaded {count} catalog entries");
                Ok(count)
            }
            Err(error) => {
                tracing::warn!("Error loading data: {}", error.backend_message());
                Err(error)
            }
        }
    }
}
