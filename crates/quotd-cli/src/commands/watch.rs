use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use quotd_core::sync::{SyncEvent, SyncScheduler};
use tokio::sync::mpsc;

use crate::commands::common::{open_store, require_sync_engine};
use crate::error::CliError;

pub async fn run_watch(
    interval_override: Option<Duration>,
    db_path: &Path,
) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let engine = require_sync_engine(&store)?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(engine.with_events(events_tx));
    let interval = interval_override.unwrap_or(engine.config().interval);

    println!(
        "Syncing every {}s; press Ctrl-C to stop.",
        interval.as_secs()
    );
    let scheduler = SyncScheduler::spawn(Arc::clone(&engine), interval);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events_rx.recv() => {
                match event {
                    Some(SyncEvent::Updated { added }) => {
                        println!("Quotes updated from server ({added} added).");
                    }
                    Some(SyncEvent::CycleFailed(reason)) => {
                        println!("Failed to sync with server: {reason}");
                    }
                    Some(SyncEvent::PushFailed(reason)) => {
                        println!("Failed to push quote to server: {reason}");
                    }
                    None => break,
                }
            }
        }
    }

    scheduler.shutdown().await;
    Ok(())
}
