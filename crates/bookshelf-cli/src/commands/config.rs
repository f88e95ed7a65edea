use std::env;

use bookshelf_core::config::{ENV_COLLECTION, ENV_SUPABASE_ANON_KEY, ENV_SUPABASE_URL};
use bookshelf_core::store::DEFAULT_COLLECTION;

use crate::cli::ConfigCommands;
use crate::config_profiles::{is_http_url, normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            supabase_url,
            supabase_anon_key,
            collection,
            no_activate,
        } => run_config_init(
            global_profile,
            supabase_url,
            supabase_anon_key,
            collection,
            no_activate,
        ),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    profile_name: Option<&str>,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    collection: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing_profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged = merge_profile(
        CliProfile {
            supabase_url,
            supabase_anon_key,
            collection,
        },
        |key| env::var(key).ok(),
        &existing_profile,
    );
    validate_profile(&merged)?;

    *config.profile_mut_or_default(&profile_name) = merged;
    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config
        .profiles
        .get(&profile_name)
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    let mut missing_fields = Vec::new();
    if profile.supabase_url().is_none() {
        missing_fields.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing_fields.push("supabase_anon_key");
    }
    if missing_fields.len() == 2 {
        println!("Profile '{profile_name}' has no Supabase project; entries stay in the local database.");
    } else if missing_fields.is_empty() {
        println!(
            "Profile '{profile_name}' uses collection '{}'. Run `bookshelf auth login --email <email> --password <password>`.",
            profile.collection().as_deref().unwrap_or(DEFAULT_COLLECTION)
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

/// Explicit flags win over the environment, which wins over the stored profile.
pub fn merge_profile(
    explicit: CliProfile,
    env_lookup: impl Fn(&str) -> Option<String>,
    existing: &CliProfile,
) -> CliProfile {
    CliProfile {
        supabase_url: normalize_text_option(explicit.supabase_url)
            .or_else(|| normalize_text_option(env_lookup(ENV_SUPABASE_URL)))
            .or_else(|| existing.supabase_url()),
        supabase_anon_key: normalize_text_option(explicit.supabase_anon_key)
            .or_else(|| normalize_text_option(env_lookup(ENV_SUPABASE_ANON_KEY)))
            .or_else(|| existing.supabase_anon_key()),
        collection: normalize_text_option(explicit.collection)
            .or_else(|| normalize_text_option(env_lookup(ENV_COLLECTION)))
            .or_else(|| existing.collection()),
    }
}

pub fn validate_profile(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}
