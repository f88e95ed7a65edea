//! Bookshelf CLI - Command-line interface for a personal book catalog
//!
//! Browse, add, edit and delete book entries stored in a Supabase collection,
//! or in a local database when no project is configured.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::{resolve_db_path, CliContext};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::cover::run_cover;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::share::{run_link, run_share};
use crate::commands::show::run_show;
use crate::commands::starter::run_starter;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        match error {
            CliError::Notice(notice) => eprintln!("{notice}"),
            other => eprintln!("Error: {other}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let default_directive = "bookshelf=warn"
        .parse::<tracing_subscriber::filter::Directive>()
        .map_err(|error| CliError::Config(format!("Invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let ctx = || -> Result<CliContext, CliError> {
        Ok(CliContext {
            db_path: resolve_db_path(cli.db_path.clone())?,
            profile: cli.profile.clone(),
        })
    };

    match command {
        Commands::List { query, json } => run_list(&ctx()?, query.as_deref(), json).await?,
        Commands::Show { id, json } => run_show(&ctx()?, &id, json).await?,
        Commands::Add { quick, fields } => run_add(&ctx()?, quick, &fields).await?,
        Commands::Edit { id, fields } => run_edit(&ctx()?, &id, &fields).await?,
        Commands::Delete { id, yes } => run_delete(&ctx()?, &id, yes).await?,
        Commands::Share { id } => run_share(&ctx()?, &id).await?,
        Commands::Link { id } => run_link(&ctx()?, &id).await?,
        Commands::Cover { id, output } => run_cover(&ctx()?, &id, output.as_deref()).await?,
        Commands::Starter { json } => run_starter(json)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Auth { command } => run_auth(command, profile).await?,
    }

    Ok(())
}
