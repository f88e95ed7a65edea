use bookshelf_core::catalog::{Confirmation, DeleteOutcome, EntryDeletion, Notice};
use bookshelf_core::store::DocumentStore;
use bookshelf_core::EntryId;

use crate::commands::common::{find_entry, open_catalog, prompt_confirmation, CliContext};
use crate::error::CliError;

pub async fn run_delete(ctx: &CliContext, id: &str, assume_yes: bool) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;
    let title = entry.title().to_string();

    let confirmation =
        |_: &EntryId| assume_yes || prompt_confirmation(&format!("Delete \"{title}\"?"));

    match delete_entry(&catalog.store, Some(&entry.id), confirmation).await? {
        DeleteOutcome::Deleted(id) => {
            eprintln!("{}", Notice::Deleted);
            println!("{id}");
        }
        DeleteOutcome::Cancelled => eprintln!("Cancelled"),
    }
    Ok(())
}

pub async fn delete_entry<S: DocumentStore>(
    store: S,
    id: Option<&EntryId>,
    confirmation: impl Confirmation,
) -> Result<DeleteOutcome, CliError> {
    EntryDeletion::new(store)
        .delete(id, confirmation)
        .await
        .map_err(|error| CliError::from_action(&error))
}
