//! Account access through Supabase's GoTrue service.
//!
//! [`Account`] carries the five operations a front-end needs: sign in, sign
//! up, sign out, current user and password reset. Sessions outlive the
//! process through a [`SessionVault`] supplied by the front-end; a restored
//! [`AuthSession`] is what catalog components receive as their
//! [`SessionProvider`](crate::session::SessionProvider).

mod account;
mod credentials;
mod gotrue;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::unix_timestamp_now;

pub use account::Account;
pub use credentials::{Credentials, MIN_PASSWORD_LEN};

/// Seconds before the recorded expiry at which a session counts as stale.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Identity of a signed-in account; `id` is the owner uid stored on entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_timestamp_now())
    }

    const fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now.saturating_add(EXPIRY_MARGIN_SECS)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The project auto-confirms accounts; the new session is already stored.
    SignedIn(AuthSession),
    /// A confirmation e-mail was sent; sign in once it is confirmed.
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// Rejected locally before any request; the text is shown as is.
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The auth service refused the call; carries its own message.
    #[error("{0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where the current session lives between runs.
pub trait SessionVault {
    fn load(&self) -> AuthResult<Option<AuthSession>>;
    fn store(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear(&self) -> AuthResult<()>;
}

impl<V: SessionVault + ?Sized> SessionVault for &V {
    fn load(&self) -> AuthResult<Option<AuthSession>> {
        (**self).load()
    }

    fn store(&self, session: &AuthSession) -> AuthResult<()> {
        (**self).store(session)
    }

    fn clear(&self) -> AuthResult<()> {
        (**self).clear()
    }
}
