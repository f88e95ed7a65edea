use crate::commands::common::{find_entry, open_catalog, CliContext};
use crate::error::CliError;

pub async fn run_share(ctx: &CliContext, id: &str) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;
    println!("{}", entry.share_text());
    Ok(())
}

pub async fn run_link(ctx: &CliContext, id: &str) -> Result<(), CliError> {
    let catalog = open_catalog(ctx).await?;
    let entry = find_entry(&catalog.store, &catalog.session, id).await?;
    println!("{}", entry.link_or_default());
    Ok(())
}
