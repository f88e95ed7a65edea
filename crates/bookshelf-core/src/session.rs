//! Session capability handed to catalog components.
//!
//! Components never reach for ambient auth state; whoever builds them passes
//! in something that can answer "who is signed in right now".

use crate::auth::{AuthSession, AuthUser};

/// Source of the currently authenticated user.
pub trait SessionProvider {
    /// The signed-in user, or `None` when the session is absent or gone.
    fn current_user(&self) -> Option<AuthUser>;

    /// Identity used for owner scoping.
    fn current_uid(&self) -> Option<String> {
        self.current_user().map(|user| user.id)
    }
}

impl SessionProvider for AuthSession {
    fn current_user(&self) -> Option<AuthUser> {
        Some(self.user.clone())
    }
}

impl<T: SessionProvider> SessionProvider for Option<T> {
    fn current_user(&self) -> Option<AuthUser> {
        self.as_ref().and_then(SessionProvider::current_user)
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for &T {
    fn current_user(&self) -> Option<AuthUser> {
        (**self).current_user()
    }
}

/// A session fixed at construction time.
///
/// Used for local-only mode and for tests that need a deterministic user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSession {
    user: Option<AuthUser>,
}

impl FixedSession {
    pub fn signed_in(uid: impl Into<String>) -> Self {
        Self {
            user: Some(AuthUser {
                id: uid.into(),
                email: None,
            }),
        }
    }

    pub const fn signed_out() -> Self {
        Self { user: None }
    }
}

impl SessionProvider for FixedSession {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_session_reports_uid() {
        assert_eq!(
            FixedSession::signed_in("user-1").current_uid().as_deref(),
            Some("user-1")
        );
        assert_eq!(FixedSession::signed_out().current_uid(), None);
    }

    #[test]
    fn optional_session_delegates() {
        let none: Option<FixedSession> = None;
        assert!(none.current_user().is_none());
        let some = Some(FixedSession::signed_in("u"));
        assert_eq!(some.current_uid().as_deref(), Some("u"));
    }
}
