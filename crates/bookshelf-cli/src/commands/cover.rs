use std::path::Path;

use bookshelf_core::media::{resolve_cover, CoverFetcher, CoverImage};

use crate::commands::common::{find_entry, open_catalog, CliContext};
use crate::error::CliError;

pub async fn run_cover(ctx: &CliContext, id: &str, output: Option<&Path>) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;

    let source = resolve_cover(&entry.document.image_ref);
    let fetcher = CoverFetcher::new()?;
    match fetcher.load(&source).await {
        CoverImage::Downloaded {
            bytes,
            content_type,
        } => {
            if let Some(path) = output {
                std::fs::write(path, &bytes)?;
                println!("{}", path.display());
            } else {
                let content_type = content_type.as_deref().unwrap_or("unknown type");
                println!("{} ({} bytes, {content_type})", entry.document.image_ref, bytes.len());
            }
        }
        CoverImage::Bundled(cover) => {
            let asset = cover.asset();
            println!("{}  {} by {}", cover.key(), asset.title, asset.author);
        }
        CoverImage::Placeholder(cover) => {
            eprintln!("Cover could not be loaded; showing {}", cover.label());
            println!("{}", cover.key());
        }
    }
    Ok(())
}
