use bookshelf_core::models::{CoverAsset, STARTER_CATALOG};

use crate::error::CliError;

pub fn run_starter(as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&STARTER_CATALOG[..])?);
    } else {
        for line in format_starter_lines(&STARTER_CATALOG) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_starter_lines(books: &[CoverAsset]) -> Vec<String> {
    books
        .iter()
        .map(|book| {
            format!(
                "{:<6} {:<45} {:<20} {}",
                book.cover.key(),
                book.title,
                book.author,
                book.link
            )
        })
        .collect()
}
