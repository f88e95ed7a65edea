use bookshelf_core::catalog::filter_entries;
use bookshelf_core::session::SessionProvider;
use bookshelf_core::store::DocumentStore;
use bookshelf_core::CatalogEntry;

use crate::commands::common::{
    entry_to_list_item, format_entry_lines, load_entries, open_catalog, CliContext, EntryListItem,
};
use crate::error::CliError;

pub async fn run_list(ctx: &CliContext, query: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entries = list_entries(&catalog.store, &catalog.session, query).await?;

    if as_json {
        let json_items = entries
            .iter()
            .map(entry_to_list_item)
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if entries.is_empty() {
        eprintln!("No books found");
    } else {
        for line in format_entry_lines(&entries) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Owner-scoped entries in catalog order, narrowed by an optional title query.
pub async fn list_entries<S: DocumentStore, P: SessionProvider>(
    store: S,
    session: P,
    query: Option<&str>,
) -> Result<Vec<CatalogEntry>, CliError> {
    let entries = load_entries(store, session).await?;
    Ok(filter_entries(&entries, query))
}
