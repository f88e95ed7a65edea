use std::io::{self, IsTerminal};

use bookshelf_core::catalog::{EntryEditor, EntryForm, Notice, SaveOutcome};
use bookshelf_core::handoff::EntryHandoff;
use bookshelf_core::session::SessionProvider;
use bookshelf_core::store::DocumentStore;
use bookshelf_core::CatalogEntry;

use crate::cli::EntryFields;
use crate::commands::common::{
    apply_fields, capture_editor_input_with_initial, find_entry, open_catalog,
    parse_handoff_template, render_handoff_template, CliContext,
};
use crate::error::CliError;

const TEMPLATE_HEADER: &str = "# Edit the fields below. Lines starting with '#' are ignored.\n\
# IMAGE_REF takes a cover key (book1..book9) or an image URL.\n\
# Write line breaks as \\n and a literal backslash as \\\\.\n";

pub async fn run_edit(ctx: &CliContext, id: &str, fields: &EntryFields) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;

    let handoff = if fields.is_empty() && io::stdin().is_terminal() {
        let current = render_handoff_template(&EntryHandoff::from_entry(&entry));
        let edited = capture_editor_input_with_initial(&format!("{TEMPLATE_HEADER}{current}\n"))?;
        let mut handoff = parse_handoff_template(&edited);
        handoff.book_id = Some(entry.id.clone());
        handoff
    } else {
        EntryHandoff::from_entry(&entry)
    };

    let outcome = edit_entry(&catalog.store, &catalog.session, &entry, &handoff, fields).await?;
    eprintln!("{}", Notice::Updated);
    println!("{}", outcome.id());
    Ok(())
}

/// Prefill from `handoff`, overlay `fields`, then replace `entry` in full.
pub async fn edit_entry<S: DocumentStore, P: SessionProvider>(
    store: S,
    session: P,
    entry: &CatalogEntry,
    handoff: &EntryHandoff,
    fields: &EntryFields,
) -> Result<SaveOutcome, CliError> {
    let mut form = EntryForm::from_handoff(handoff);
    apply_fields(&mut form, fields)?;

    EntryEditor::new(store, session)
        .save(Some(&entry.id), &form)
        .await
        .map_err(|error| CliError::from_action(&error))
}
