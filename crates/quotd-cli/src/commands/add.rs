use std::path::Path;

use quotd_core::sync::SyncEvent;
use tokio::sync::mpsc;

use crate::commands::common::{open_store, resolve_quote_text, sync_engine};
use crate::error::CliError;

pub async fn run_add(text_parts: &[String], category: &str, db_path: &Path) -> Result<(), CliError> {
    let text = resolve_quote_text(text_parts)?;

    let store = open_store(db_path).await?;
    let quote = store.add(&text, category)?;
    store.save().await?;

    match sync_engine(&store)? {
        Some(engine) => {
            let (events_tx, mut events_rx) = mpsc::unbounded_channel();
            let engine = engine.with_events(events_tx);
            engine.sync_after_add(&quote).await;
            drop(engine);

            let mut push_failed = false;
            while let Ok(event) = events_rx.try_recv() {
                match event {
                    SyncEvent::PushFailed(_) => push_failed = true,
                    SyncEvent::Updated { added } => {
                        println!("Quotes updated from server ({added} added).");
                    }
                    SyncEvent::CycleFailed(reason) => {
                        tracing::warn!("Sync after add failed: {reason}");
                    }
                }
            }

            if push_failed {
                println!("Quote saved locally but failed to sync to server.");
            } else {
                println!("Quote added and synced to server!");
            }
        }
        None => println!("Quote added."),
    }

    Ok(())
}
