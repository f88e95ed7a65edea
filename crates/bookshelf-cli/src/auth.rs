//! Per-profile Supabase accounts whose sessions live in the OS keychain.

use bookshelf_core::auth::{Account, AuthError, AuthResult, AuthSession, SessionVault};
use bookshelf_core::config::{BackendConfig, RemoteBackend};

use crate::config_profiles::CliProfile;
use crate::error::CliError;

pub type ProfileAccount = Account<KeychainVault>;

/// Keychain slot holding one profile's session as JSON.
#[derive(Debug, Clone)]
pub struct KeychainVault {
    slot: String,
}

impl KeychainVault {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            slot: format!("supabase_session:{profile_name}"),
        }
    }
}

impl SessionVault for KeychainVault {
    fn load(&self) -> AuthResult<Option<AuthSession>> {
        secret::read(&self.slot)?
            .map(|raw| serde_json::from_str(&raw).map_err(AuthError::from))
            .transpose()
    }

    fn store(&self, session: &AuthSession) -> AuthResult<()> {
        secret::write(&self.slot, &serde_json::to_string(session)?)
    }

    fn clear(&self) -> AuthResult<()> {
        secret::erase(&self.slot)
    }
}

#[cfg(not(test))]
mod secret {
    use bookshelf_core::auth::{AuthError, AuthResult};
    use keyring::Entry;

    const SERVICE: &str = "bookshelf-cli";

    fn entry(slot: &str) -> AuthResult<Entry> {
        Entry::new(SERVICE, slot).map_err(storage_error)
    }

    pub fn read(slot: &str) -> AuthResult<Option<String>> {
        match entry(slot)?.get_password() {
            Ok(raw) => Ok(Some(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(storage_error(error)),
        }
    }

    pub fn write(slot: &str, raw: &str) -> AuthResult<()> {
        entry(slot)?.set_password(raw).map_err(storage_error)
    }

    pub fn erase(slot: &str) -> AuthResult<()> {
        match entry(slot)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }

    fn storage_error(error: keyring::Error) -> AuthError {
        AuthError::SecureStorage(error.to_string())
    }
}

// Tests never touch the real keychain.
#[cfg(test)]
mod secret {
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    use bookshelf_core::auth::{AuthError, AuthResult};

    fn slots() -> AuthResult<MutexGuard<'static, HashMap<String, String>>> {
        static SLOTS: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        SLOTS
            .get_or_init(Mutex::default)
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }

    pub fn read(slot: &str) -> AuthResult<Option<String>> {
        Ok(slots()?.get(slot).cloned())
    }

    pub fn write(slot: &str, raw: &str) -> AuthResult<()> {
        slots()?.insert(slot.to_string(), raw.to_string());
        Ok(())
    }

    pub fn erase(slot: &str) -> AuthResult<()> {
        slots()?.remove(slot);
        Ok(())
    }
}

/// Hosted backend for a profile, merged with environment overrides.
pub fn remote_backend(profile: &CliProfile) -> Result<Option<RemoteBackend>, CliError> {
    profile
        .backend_config()
        .or(BackendConfig::from_env())
        .remote()
        .map_err(CliError::Config)
}

/// Account for a profile, or `None` when it has no Supabase project.
pub fn profile_account(
    profile_name: &str,
    profile: &CliProfile,
) -> Result<Option<ProfileAccount>, CliError> {
    remote_backend(profile)?
        .map(|remote| remote_account(profile_name, &remote))
        .transpose()
}

pub fn remote_account(
    profile_name: &str,
    remote: &RemoteBackend,
) -> Result<ProfileAccount, CliError> {
    Ok(Account::new(
        &remote.supabase_url,
        &remote.supabase_anon_key,
        KeychainVault::for_profile(profile_name),
    )?)
}
