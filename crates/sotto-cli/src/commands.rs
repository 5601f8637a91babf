//! Operator subcommands over the ledger document.

use std::path::Path;

use anyhow::Result;
use sotto_core::{LedgerStore, MessageId, RelayConfig};
use time::format_description::well_known::Rfc3339;

/// Print the counter, the recorded entry count, and any burned ids.
pub async fn status(path: &Path) -> Result<()> {
    let ledger = LedgerStore::open(path).await?;

    println!("ledger: {}", ledger.path().display());
    println!("last allocated id: {}", ledger.last_id());
    println!("recorded entries: {}", ledger.len());

    let burned = ledger.missing_ids();
    if burned.is_empty() {
        println!("burned ids: none");
    } else {
        let list = burned
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("burned ids ({}): {}", burned.len(), list);
    }

    Ok(())
}

/// Print the original author reference and content for one entry.
///
/// Local operator access stands in for the moderator capability here;
/// the in-bot reveal path goes through the permission collaborator.
pub async fn reveal(path: &Path, id: u64) -> Result<()> {
    let ledger = LedgerStore::open(path).await?;
    let id = MessageId(id);

    match ledger.get(id) {
        Some(entry) => {
            println!("number:  {}", entry.id);
            println!("author:  {}", entry.author);
            println!("content: {}", entry.content);
            println!("sent at: {}", entry.timestamp.format(&Rfc3339)?);
        }
        None => println!("no ledger entry for {id}"),
    }

    Ok(())
}

/// Validate the environment and print the non-secret values. Fails
/// with the name of the first missing variable, exactly as the relay's
/// startup would.
pub fn check_config() -> Result<()> {
    let config = RelayConfig::from_env()?;

    println!("configuration ok");
    println!("channel: {}", config.channel_id);
    println!("guild: {}", config.guild_id);
    println!("probe port: {}", config.port);
    println!("ledger: {}", config.ledger_path.display());
    println!("anonymous label: {}", config.anonymous_label);

    Ok(())
}
