use std::io;

use bookshelf_core::auth::AuthError;
use bookshelf_core::catalog::Notice;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] bookshelf_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    /// A catalog outcome already phrased for the user
    #[error("{0}")]
    Notice(Notice),
    #[error("Entry ID cannot be empty")]
    EmptyEntryId,
    #[error("Entry not found for id/prefix: {0}")]
    EntryNotFound(String),
    #[error("{0}")]
    AmbiguousEntryId(String),
    #[error("Cover number must be between 1 and 9, got {0}")]
    InvalidCover(usize),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error(
        "Profile '{0}' is not signed in. Run `bookshelf auth login --email <email> --password <password>` first."
    )]
    NotSignedIn(String),
}

impl CliError {
    /// Wrap a failed save or delete as its user-facing notice.
    pub fn from_action(error: &bookshelf_core::Error) -> Self {
        Self::Notice(Notice::from_error(error))
    }

    /// Wrap a failed reload as its user-facing notice.
    pub fn from_load(error: &bookshelf_core::Error) -> Self {
        Self::Notice(Notice::load_failed(error))
    }
}
