use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Keep a personal catalog of books from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local-only database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// CLI profile name for Supabase configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog entries, sorted by reading time
    #[command(alias = "ls")]
    List {
        /// Only show entries whose title contains this text (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one entry
    Show {
        /// Entry ID or unique ID prefix
        id: String,
        /// Output as JSON, including the editor handoff payload
        #[arg(long)]
        json: bool,
    },
    /// Add a new entry
    #[command(alias = "new")]
    Add {
        /// Start from the quick-add preset
        #[arg(long)]
        quick: bool,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Edit an existing entry (every field is rewritten)
    Edit {
        /// Entry ID or unique ID prefix
        id: String,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an existing entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print share text for an entry
    Share {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Print the entry's external link
    Link {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Resolve an entry's cover image
    Cover {
        /// Entry ID or unique ID prefix
        id: String,
        /// Write a downloaded cover to this path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List the bundled starter books
    Starter {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Authenticate CLI profile with Supabase
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// Form fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    /// Book title
    #[arg(long)]
    pub title: Option<String>,
    /// Book author
    #[arg(long)]
    pub author: Option<String>,
    /// Reading time, e.g. "3 hours"
    #[arg(long)]
    pub time: Option<String>,
    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
    /// External link for the book
    #[arg(long)]
    pub url: Option<String>,
    /// Remote cover image URL (takes precedence over --cover)
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,
    /// Bundled cover number (1-9)
    #[arg(long, value_name = "N")]
    pub cover: Option<usize>,
}

impl EntryFields {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.time.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.image_url.is_none()
            && self.cover.is_none()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Collection holding catalog entries (defaults to `items`)
        #[arg(long, value_name = "NAME")]
        collection: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create a Supabase account
    Signup {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password (at least 6 characters)
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Login with Supabase email/password and store session in keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Show auth status for profile
    Status,
    /// Logout profile and clear stored session
    Logout,
    /// Send a password reset email
    ResetPassword {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
}
