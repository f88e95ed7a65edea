//! Error types for bookshelf-core

use thiserror::Error;

/// Result type alias using bookshelf-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bookshelf-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error talking to the hosted store
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store rejected the call; carries the backend's own message
    #[error("{0}")]
    Remote(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required form fields are empty after trimming
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// No authenticated user is available
    #[error("You must be signed in")]
    SignInRequired,

    /// An operation that needs a persisted entry was given none
    #[error("Entry id is missing")]
    MissingEntryId,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Message suitable for surfacing to the user verbatim.
    ///
    /// Remote failures keep the backend's text untouched; transport errors
    /// collapse to their display form.
    #[must_use]
    pub fn backend_message(&self) -> String {
        match self {
            Self::Remote(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
