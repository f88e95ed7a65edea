use std::fmt;

use serde::Serialize;

use super::{AuthError, AuthResult};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trimmed e-mail and password, checked before anything is sent.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn for_sign_in(email: &str, password: &str) -> AuthResult<Self> {
        let (email, password) = (email.trim(), password.trim());
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Please fill in all fields".to_string(),
            ));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Sign-in rules plus the minimum password length.
    pub fn for_sign_up(email: &str, password: &str) -> AuthResult<Self> {
        let credentials = Self::for_sign_in(email, password)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidCredentials(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(credentials)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Trimmed recovery address.
pub fn reset_email(email: &str) -> AuthResult<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::InvalidCredentials(
            "Please enter your email first".to_string(),
        ));
    }
    Ok(email)
}
