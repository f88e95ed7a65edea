//! bookshelf-core - Core library for Bookshelf
//!
//! This crate contains the catalog models, document stores, auth client and
//! catalog components shared by every Bookshelf interface.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handoff;
pub mod media;
pub mod models;
pub mod session;
pub mod store;
mod util;

pub use error::{Error, Result};
pub use models::{CatalogEntry, Cover, EntryDocument, EntryId};
