use bookshelf_core::auth::{AuthSession, SessionVault, SignUpOutcome};

use crate::auth::{profile_account, KeychainVault, ProfileAccount};
use crate::cli::AuthCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let account = profile_account(&profile_name, &profile)?;

    match command {
        AuthCommands::Signup { email, password } => {
            match require_account(account, &profile_name)?
                .sign_up(&email, &password)
                .await?
            {
                SignUpOutcome::SignedIn(session) => {
                    println!(
                        "Account created; profile '{profile_name}' signed in as {}",
                        email_label(&session)
                    );
                }
                SignUpOutcome::ConfirmationRequired => {
                    println!("Account created. Check {email} to confirm it, then run `bookshelf auth login`.");
                }
            }
        }
        AuthCommands::Login { email, password } => {
            let session = require_account(account, &profile_name)?
                .sign_in(&email, &password)
                .await?;
            println!("Signed in profile '{profile_name}' as {}", email_label(&session));
        }
        AuthCommands::Status => {
            let Some(account) = account else {
                println!("Profile '{profile_name}' has no Supabase project; using the local database.");
                return Ok(());
            };
            match account.session().await? {
                Some(session) => println!(
                    "Profile '{profile_name}' is signed in as {} (expires_at={})",
                    email_label(&session),
                    session.expires_at
                ),
                None => println!("Profile '{profile_name}' is not signed in."),
            }
        }
        AuthCommands::Logout => {
            match account {
                Some(account) => account.sign_out().await?,
                // No project left to revoke against; just drop the local copy.
                None => KeychainVault::for_profile(&profile_name).clear()?,
            }
            println!("Signed out profile '{profile_name}'");
        }
        AuthCommands::ResetPassword { email } => {
            require_account(account, &profile_name)?
                .send_password_reset(&email)
                .await?;
            println!("Password reset email sent to {}", email.trim());
        }
    }
    Ok(())
}

fn email_label(session: &AuthSession) -> &str {
    session.user.email.as_deref().unwrap_or("(no email)")
}

fn require_account(
    account: Option<ProfileAccount>,
    profile_name: &str,
) -> Result<ProfileAccount, CliError> {
    account.ok_or_else(|| {
        CliError::Config(format!(
            "Profile '{profile_name}' missing Supabase auth config. Set SUPABASE_URL and SUPABASE_ANON_KEY via `bookshelf config init --profile {profile_name}`."
        ))
    })
}
