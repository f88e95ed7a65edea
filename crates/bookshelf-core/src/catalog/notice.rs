//! Short user-facing messages for catalog outcomes.

use std::fmt;

use crate::error::Error;

/// Transient message shown after a catalog action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed(String),
    MissingFields,
    SignInRequired,
    Added,
    Updated,
    Deleted,
    Failed(String),
}

impl Notice {
    /// Notice for a failed reload.
    #[must_use]
    pub fn load_failed(error: &Error) -> Self {
        match error {
            Error::SignInRequired => Self::SignInRequired,
            other => Self::LoadFailed(other.backend_message()),
        }
    }

    /// Notice for a failed save or delete.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Validation(_) => Self::MissingFields,
            Error::SignInRequired => Self::SignInRequired,
            other => Self::Failed(other.backend_message()),
        }
    }

    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Added | Self::Updated | Self::Deleted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed(message) => write!(f, "Error loading data: {message}"),
            Self::MissingFields => f.write_str("Please fill out Title, Author and Time"),
            Self::SignInRequired => f.write_str("You must be signed in"),
            Self::Added => f.write_str("Book added!"),
            Self::Updated => f.write_str("Book updated!"),
            Self::Deleted => f.write_str("Book deleted"),
            Self::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}
