use bookshelf_core::catalog::{EntryEditor, EntryForm, Notice, SaveOutcome};
use bookshelf_core::session::SessionProvider;
use bookshelf_core::store::DocumentStore;

use crate::cli::EntryFields;
use crate::commands::common::{apply_fields, open_catalog, CliContext};
use crate::error::CliError;

pub async fn run_add(ctx: &CliContext, quick: bool, fields: &EntryFields) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let outcome = add_entry(&catalog.store, &catalog.session, quick, fields).await?;

    eprintln!("{}", Notice::Added);
    println!("{}", outcome.id());
    Ok(())
}

pub async fn add_entry<S: DocumentStore, P: SessionProvider>(
    store: S,
    session: P,
    quick: bool,
    fields: &EntryFields,
) -> Result<SaveOutcome, CliError> {
    let mut form = if quick {
        EntryForm::quick_add()
    } else {
        EntryForm::default()
    };
    apply_fields(&mut form, fields)?;

    EntryEditor::new(store, session)
        .save(None, &form)
        .await
        .map_err(|error| CliError::from_action(&error))
}
