use std::path::Path;

use crate::commands::common::{format_sync_timestamp, open_store, require_sync_engine};
use crate::error::CliError;

pub async fn run_sync(db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let engine = require_sync_engine(&store)?;

    let summary = engine.run_sync_cycle().await;
    if !summary.succeeded {
        println!("Failed to sync with server.");
        return Ok(());
    }

    if summary.added > 0 {
        println!(
            "Quotes updated from server: {} added at {}.",
            summary.added,
            format_sync_timestamp(summary.completed_at)
        );
    } else {
        println!(
            "Already up to date ({} remote quotes checked).",
            summary.fetched
        );
    }

    Ok(())
}
