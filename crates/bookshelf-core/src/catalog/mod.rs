//! Catalog components: loading, filtering, editing and deleting entries.
//!
//! Each component is handed its store and session explicitly. None of them
//! retries; failures come back as [`crate::Error`] and map to a [`Notice`].

mod deletion;
mod editor;
mod filter;
mod loader;
mod notice;
mod state;

pub use deletion::{Confirmation, DeleteOutcome, EntryDeletion};
pub use editor::{EntryEditor, EntryForm, SaveOutcome};
pub use filter::filter_entries;
pub use loader::CatalogLoader;
pub use notice::Notice;
pub use state::CatalogState;
