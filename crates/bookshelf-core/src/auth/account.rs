use super::credentials::reset_email;
use super::gotrue::{GoTrueClient, Grant};
use super::{AuthError, AuthResult, AuthSession, AuthUser, Credentials, SessionVault, SignUpOutcome};

/// A Supabase account as seen by one front-end.
///
/// Every successful grant is written to the vault, so a later run can pick the
/// session up again through [`Account::session`].
#[derive(Debug, Clone)]
pub struct Account<V> {
    gotrue: GoTrueClient,
    vault: V,
}

impl<V: SessionVault> Account<V> {
    pub fn new(project_url: &str, anon_key: &str, vault: V) -> AuthResult<Self> {
        Ok(Self {
            gotrue: GoTrueClient::new(project_url, anon_key)?,
            vault,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let credentials = Credentials::for_sign_in(email, password)?;
        match self.gotrue.password_grant(&credentials).await? {
            Grant::Session(session) => self.keep(session),
            Grant::Pending => Err(AuthError::Api(
                "Sign-in response did not include an active session".to_string(),
            )),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        let credentials = Credentials::for_sign_up(email, password)?;
        match self.gotrue.sign_up(&credentials).await? {
            Grant::Session(session) => self.keep(session).map(SignUpOutcome::SignedIn),
            Grant::Pending => {
                tracing::info!("Sign-up for {} awaits confirmation", credentials.email());
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    /// Forget the local session, revoking it remotely when there is one.
    ///
    /// The vault is cleared even if revocation fails; the failure is logged.
    pub async fn sign_out(&self) -> AuthResult<()> {
        if let Some(session) = self.vault.load()? {
            if let Err(error) = self.gotrue.logout(&session.access_token).await {
                tracing::warn!("Failed to revoke session remotely: {error}");
            }
        }
        self.vault.clear()
    }

    /// The stored session, refreshed once if it has expired.
    ///
    /// A failed refresh clears the vault and reports no session.
    pub async fn session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored) = self.vault.load()? else {
            return Ok(None);
        };
        if !stored.is_expired() {
            return Ok(Some(stored));
        }

        match self.gotrue.refresh_grant(&stored.refresh_token).await {
            Ok(Grant::Session(refreshed)) => self.keep(refreshed).map(Some),
            Ok(Grant::Pending) => {
                tracing::warn!("Refresh returned no session; signing out");
                self.vault.clear()?;
                Ok(None)
            }
            Err(error) => {
                tracing::warn!("Failed to refresh stored session: {error}");
                self.vault.clear()?;
                Ok(None)
            }
        }
    }

    pub async fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        Ok(self.session().await?.map(|session| session.user))
    }

    pub async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        self.gotrue.recover(reset_email(email)?).await
    }

    fn keep(&self, session: AuthSession) -> AuthResult<AuthSession> {
        self.vault.store(&session)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use pretty_assertions::assert_eq;

    // Nothing listens on the discard port, so remote calls fail fast.
    const UNREACHABLE_PROJECT: &str = "http://127.0.0.1:9";

    #[derive(Debug, Default)]
    struct MemoryVault {
        session: Mutex<Option<AuthSession>>,
    }

    impl MemoryVault {
        fn holding(session: AuthSession) -> Self {
            Self {
                session: Mutex::new(Some(session)),
            }
        }

        fn current(&self) -> Option<AuthSession> {
            self.session.lock().unwrap().clone()
        }
    }

    impl SessionVault for MemoryVault {
        fn load(&self) -> AuthResult<Option<AuthSession>> {
            Ok(self.current())
        }

        fn store(&self, session: &AuthSession) -> AuthResult<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear(&self) -> AuthResult<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    fn session(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("reader@example.com".to_string()),
            },
        }
    }

    fn account(vault: &MemoryVault) -> Account<&MemoryVault> {
        Account::new(UNREACHABLE_PROJECT, "anon", vault).unwrap()
    }

    #[tokio::test]
    async fn fresh_session_is_returned_without_network() {
        let vault = MemoryVault::holding(session(i64::MAX));
        let user = account(&vault).current_user().await.unwrap();
        assert_eq!(user.map(|user| user.id).as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn failed_refresh_signs_out() {
        let vault = MemoryVault::holding(session(0));
        assert_eq!(account(&vault).session().await.unwrap(), None);
        assert_eq!(vault.current(), None);
    }

    #[tokio::test]
    async fn sign_out_clears_vault_even_when_revocation_fails() {
        let vault = MemoryVault::holding(session(i64::MAX));
        account(&vault).sign_out().await.unwrap();
        assert_eq!(vault.current(), None);
    }

    #[tokio::test]
    async fn empty_vault_means_signed_out() {
        let vault = MemoryVault::default();
        assert_eq!(account(&vault).current_user().await.unwrap(), None);
        account(&vault).sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_any_request() {
        let vault = MemoryVault::default();
        let account = account(&vault);

        let error = account
            .sign_up("reader@example.com", "12345")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Password must be at least 6 characters");

        let error = account.sign_in("reader@example.com", " ").await.unwrap_err();
        assert_eq!(error.to_string(), "Please fill in all fields");

        let error = account.send_password_reset("").await.unwrap_err();
        assert_eq!(error.to_string(), "Please enter your email first");
    }

    #[tokio::test]
    async fn unreachable_service_surfaces_transport_error() {
        let vault = MemoryVault::default();
        let error = account(&vault)
            .sign_in("reader@example.com", "secret")
            .await
            .unwrap_err();
        assert!(matches!(error, AuthError::Http(_)));
        assert_eq!(vault.current(), None);
    }
}
