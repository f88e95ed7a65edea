//! Data models for Bookshelf

mod cover;
mod entry;

pub use cover::{Cover, CoverAsset, STARTER_CATALOG};
pub use entry::{CatalogEntry, EntryDocument, EntryId, DEFAULT_ENTRY_LINK};
