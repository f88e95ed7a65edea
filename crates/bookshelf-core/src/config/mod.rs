//! Backend configuration shared by client apps.
//!
//! A `BackendConfig` names the Supabase project and collection holding the
//! catalog. When no project is configured, clients fall back to a local
//! libSQL database.

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_COLLECTION;
use crate::util::{is_http_url, normalize_text_option};

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_COLLECTION: &str = "BOOKSHELF_COLLECTION";

/// Possibly partial backend settings, as stored in a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Fully resolved settings for the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBackend {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub collection: String,
}

impl BackendConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            supabase_url: normalize_text_option(lookup(ENV_SUPABASE_URL)),
            supabase_anon_key: normalize_text_option(lookup(ENV_SUPABASE_ANON_KEY)),
            collection: normalize_text_option(lookup(ENV_COLLECTION)),
        }
    }

    /// Fill every unset field from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            supabase_url: normalize_text_option(self.supabase_url)
                .or_else(|| normalize_text_option(fallback.supabase_url)),
            supabase_anon_key: normalize_text_option(self.supabase_anon_key)
                .or_else(|| normalize_text_option(fallback.supabase_anon_key)),
            collection: normalize_text_option(self.collection)
                .or_else(|| normalize_text_option(fallback.collection)),
        }
    }

    /// Trim values and check URL shape.
    pub fn normalized(self) -> Result<Self, String> {
        let supabase_url = match normalize_text_option(self.supabase_url) {
            Some(url) if is_http_url(&url) => Some(url.trim_end_matches('/').to_string()),
            Some(_) => return Err("supabase_url must include http:// or https://".to_string()),
            None => None,
        };
        Ok(Self {
            supabase_url,
            supabase_anon_key: normalize_text_option(self.supabase_anon_key),
            collection: normalize_text_option(self.collection),
        })
    }

    /// Hosted settings, or `None` for local-only mode.
    ///
    /// Having only one of URL and anon key is a configuration error.
    pub fn remote(&self) -> Result<Option<RemoteBackend>, String> {
        let normalized = self.clone().normalized()?;
        match (normalized.supabase_url, normalized.supabase_anon_key) {
            (Some(supabase_url), Some(supabase_anon_key)) => Ok(Some(RemoteBackend {
                supabase_url,
                supabase_anon_key,
                collection: normalized
                    .collection
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err("supabase_anon_key is required when supabase_url is set".to_string()),
            (None, Some(_)) => Err("supabase_url is required when supabase_anon_key is set".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn remote_defaults_collection() {
        let config = BackendConfig::from_lookup(lookup(&[
            (ENV_SUPABASE_URL, "https://demo.supabase.co/"),
            (ENV_SUPABASE_ANON_KEY, " anon "),
        ]));
        assert_eq!(
            config.remote().unwrap(),
            Some(RemoteBackend {
                supabase_url: "https://demo.supabase.co".to_string(),
                supabase_anon_key: "anon".to_string(),
                collection: "items".to_string(),
            })
        );
    }

    #[test]
    fn empty_config_means_local_mode() {
        let config = BackendConfig::from_lookup(lookup(&[(ENV_SUPABASE_URL, "  ")]));
        assert_eq!(config.remote().unwrap(), None);
    }

    #[test]
    fn half_configured_backend_is_rejected() {
        let config = BackendConfig {
            supabase_url: Some("https://demo.supabase.co".to_string()),
            ..BackendConfig::default()
        };
        assert!(config.remote().unwrap_err().contains("supabase_anon_key"));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let config = BackendConfig {
            supabase_url: Some("demo.supabase.co".to_string()),
            supabase_anon_key: Some("anon".to_string()),
            collection: None,
        };
        assert!(config.normalized().is_err());
    }

    #[test]
    fn or_prefers_explicit_values() {
        let explicit = BackendConfig {
            collection: Some("books".to_string()),
            ..BackendConfig::default()
        };
        let stored = BackendConfig {
            supabase_url: Some("https://demo.supabase.co".to_string()),
            supabase_anon_key: Some("anon".to_string()),
            collection: Some("items".to_string()),
        };
        let merged = explicit.or(stored);
        assert_eq!(merged.collection.as_deref(), Some("books"));
        assert_eq!(merged.supabase_anon_key.as_deref(), Some("anon"));
    }
}
