use bookshelf_core::handoff::EntryHandoff;
use bookshelf_core::media::{resolve_cover, ImageSource};
use bookshelf_core::CatalogEntry;
use serde::Serialize;

use crate::commands::common::{
    entry_to_list_item, find_entry, open_catalog, CliContext, EntryListItem,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: EntryListItem,
    pub link: String,
    pub share_text: String,
    pub handoff: EntryHandoff,
}

pub async fn run_show(ctx: &CliContext, id: &str, as_json: bool) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&entry_detail(&entry))?);
    } else {
        for line in format_entry_detail(&entry) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn entry_detail(entry: &CatalogEntry) -> EntryDetail {
    EntryDetail {
        entry: entry_to_list_item(entry),
        link: entry.link_or_default().to_string(),
        share_text: entry.share_text(),
        handoff: EntryHandoff::from_entry(entry),
    }
}

pub fn format_entry_detail(entry: &CatalogEntry) -> Vec<String> {
    let mut lines = vec![
        format!("ID:          {}", entry.id),
        format!("Title:       {}", entry.title()),
        format!("Author:      {}", entry.author()),
        format!("Time:        {}", entry.reading_time()),
        format!("Cover:       {}", describe_cover(&entry.document.image_ref)),
        format!("Link:        {}", entry.link_or_default()),
    ];
    if !entry.document.description.is_empty() {
        lines.push(String::new());
        lines.push(entry.document.description.clone());
    }
    lines
}

pub fn describe_cover(image_ref: &str) -> String {
    match resolve_cover(image_ref) {
        ImageSource::Remote { url, .. } => url,
        ImageSource::Local(asset) => format!("{} ({})", asset.cover.label(), asset.cover.key()),
    }
}
