use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use bookshelf_core::auth::{AuthSession, AuthUser};
use bookshelf_core::catalog::{CatalogLoader, CatalogState, EntryForm};
use bookshelf_core::db::{Database, LibSqlEntryStore};
use bookshelf_core::handoff::EntryHandoff;
use bookshelf_core::session::{FixedSession, SessionProvider};
use bookshelf_core::store::{DocumentStore, PostgrestDocumentStore};
use bookshelf_core::{CatalogEntry, Cover, EntryDocument, EntryId};
use serde::Serialize;

use crate::auth::{remote_account, remote_backend};
use crate::cli::EntryFields;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

/// Owner id used for every entry in local-only mode.
pub const LOCAL_OWNER_UID: &str = "local";

/// Global options every catalog command needs.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub db_path: PathBuf,
    pub profile: Option<String>,
}

/// Store selected for this invocation.
pub enum Backend {
    Remote(PostgrestDocumentStore),
    Local(Database),
}

impl DocumentStore for Backend {
    async fn query_by_owner(&self, owner_uid: &str) -> bookshelf_core::Result<Vec<CatalogEntry>> {
        match self {
            Self::Remote(store) => store.query_by_owner(owner_uid).await,
            Self::Local(db) => LibSqlEntryStore::new(db.connection()).query_by_owner(owner_uid).await,
        }
    }

    async fn add(&self, document: &EntryDocument) -> bookshelf_core::Result<EntryId> {
        match self {
            Self::Remote(store) => store.add(document).await,
            Self::Local(db) => LibSqlEntryStore::new(db.connection()).add(document).await,
        }
    }

    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> bookshelf_core::Result<()> {
        match self {
            Self::Remote(store) => store.replace(id, document).await,
            Self::Local(db) => LibSqlEntryStore::new(db.connection()).replace(id, document).await,
        }
    }

    async fn delete(&self, id: &EntryId) -> bookshelf_core::Result<()> {
        match self {
            Self::Remote(store) => store.delete(id).await,
            Self::Local(db) => LibSqlEntryStore::new(db.connection()).delete(id).await,
        }
    }
}

/// Who the catalog commands act for.
pub enum CatalogSession {
    SignedIn(AuthSession),
    Local(FixedSession),
}

impl SessionProvider for CatalogSession {
    fn current_user(&self) -> Option<AuthUser> {
        match self {
            Self::SignedIn(session) => session.current_user(),
            Self::Local(session) => session.current_user(),
        }
    }
}

/// An opened catalog: store plus the session that scopes it.
pub struct Catalog {
    pub store: Backend,
    pub session: CatalogSession,
}

/// Open the catalog for the selected profile.
///
/// Profiles with a Supabase project require a stored session; everything else
/// runs against the local database.
pub async fn open_catalog(ctx: &CliContext) -> Result<Catalog, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(ctx.profile.as_deref());
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let Some(remote) = remote_backend(&profile)? else {
        tracing::debug!("Profile '{profile_name}' has no Supabase project; using local database");
        return open_local_catalog(&ctx.db_path).await;
    };

    let session = remote_account(&profile_name, &remote)?
        .session()
        .await?
        .ok_or_else(|| CliError::NotSignedIn(profile_name.clone()))?;

    let store = PostgrestDocumentStore::new(
        &remote.supabase_url,
        remote.supabase_anon_key,
        session.access_token.clone(),
        &remote.collection,
    )?;
    tracing::debug!(
        "Using collection '{}' for profile '{profile_name}'",
        remote.collection
    );

    Ok(Catalog {
        store: Backend::Remote(store),
        session: CatalogSession::SignedIn(session),
    })
}

pub async fn open_local_catalog(db_path: &Path) -> Result<Catalog, CliError> {
    let db = Database::open(db_path).await?;
    Ok(Catalog {
        store: Backend::Local(db),
        session: CatalogSession::Local(FixedSession::signed_in(LOCAL_OWNER_UID)),
    })
}

/// Reload the signed-in user's entries.
pub async fn load_entries<S: DocumentStore, P: SessionProvider>(
    store: S,
    session: P,
) -> Result<Vec<CatalogEntry>, CliError> {
    let loader = CatalogLoader::new(store, session);
    let mut state = CatalogState::new();
    loader
        .reload(&mut state)
        .await
        .map_err(|error| CliError::from_load(&error))?;
    Ok(state.entries().to_vec())
}

/// Load the catalog and pick one entry by id or unique id prefix.
pub async fn find_entry<S: DocumentStore, P: SessionProvider>(
    store: S,
    session: P,
    id_query: &str,
) -> Result<CatalogEntry, CliError> {
    let id_query = normalize_entry_identifier(id_query)?;
    let entries = load_entries(store, session).await?;
    resolve_entry(&id_query, &entries)
}

pub fn resolve_entry(id_query: &str, entries: &[CatalogEntry]) -> Result<CatalogEntry, CliError> {
    if let Some(entry) = entries.iter().find(|entry| entry.id.as_str() == id_query) {
        return Ok(entry.clone());
    }

    let matching = entries
        .iter()
        .filter(|entry| entry.id.starts_with(id_query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::EntryNotFound(id_query.to_string())),
        [entry] => Ok((*entry).clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|entry| short_id(&entry.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousEntryId(format!(
                "ID prefix '{id_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_entry_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyEntryId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn short_id(id: &EntryId) -> String {
    id.as_str().chars().take(13).collect()
}

#[derive(Debug, Serialize)]
pub struct EntryListItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub time: String,
    pub description: String,
    pub url: String,
    pub image_ref: String,
}

pub fn entry_to_list_item(entry: &CatalogEntry) -> EntryListItem {
    EntryListItem {
        id: entry.id.to_string(),
        title: entry.document.title.clone(),
        author: entry.document.subtitle.clone(),
        time: entry.document.extra_field.clone(),
        description: entry.document.description.clone(),
        url: entry.document.url.clone(),
        image_ref: entry.document.image_ref.clone(),
    }
}

pub fn format_entry_lines(entries: &[CatalogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let short_id = short_id(&entry.id);
            let title = truncate(entry.title(), 40);
            let author = truncate(entry.author(), 24);
            let time = entry.reading_time();

            if time.is_empty() {
                format!("{short_id:<13}  {title:<40}  {author}")
            } else {
                format!("{short_id:<13}  {title:<40}  {author:<24}  {time}")
            }
        })
        .collect()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Overlay explicitly given flags onto a form.
pub fn apply_fields(form: &mut EntryForm, fields: &EntryFields) -> Result<(), CliError> {
    if let Some(title) = &fields.title {
        form.title.clone_from(title);
    }
    if let Some(author) = &fields.author {
        form.author.clone_from(author);
    }
    if let Some(time) = &fields.time {
        form.time.clone_from(time);
    }
    if let Some(description) = &fields.description {
        form.description.clone_from(description);
    }
    if let Some(url) = &fields.url {
        form.url.clone_from(url);
    }
    if let Some(image_url) = &fields.image_url {
        form.image_url.clone_from(image_url);
    }
    if let Some(number) = fields.cover {
        form.cover = Cover::from_number(number).ok_or(CliError::InvalidCover(number))?;
        if fields.image_url.is_none() {
            form.image_url.clear();
        }
    }
    Ok(())
}

/// Editable `KEY: value` lines for the handoff payload, id excluded.
pub fn render_handoff_template(handoff: &EntryHandoff) -> String {
    handoff
        .to_pairs()
        .into_iter()
        .filter(|(key, _)| *key != bookshelf_core::handoff::KEY_BOOK_ID)
        .map(|(key, value)| format!("{key}: {}", escape_template_value(&value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `KEY: value` lines back into a payload. Lines without a colon and
/// `#` comments are ignored.
pub fn parse_handoff_template(text: &str) -> EntryHandoff {
    EntryHandoff::from_pairs(text.lines().filter_map(|line| {
        if line.trim_start().starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once(':')?;
        Some((key.trim().to_string(), unescape_template_value(value.trim())))
    }))
}

/// Keep a value on one line: backslashes and line breaks become `\\`, `\n`
/// and `\r`.
fn escape_template_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_template_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` declines.
pub fn prompt_confirmation(question: &str) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return false;
    }

    eprint!("{question} [y/N] ");
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if stdin.lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn capture_editor_input_with_initial(initial_content: &str) -> Result<String, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_entry_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let edited = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(edited)
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_entry_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("bookshelf-entry-{}-{now}.txt", std::process::id()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("BOOKSHELF_DB_PATH").map(PathBuf::from))
    {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("bookshelf").join("bookshelf.db"))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}
