//! Periodic sync scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::SyncEngine;

/// Cancellable periodic sync task owned by the process lifecycle.
///
/// Runs one cycle immediately at startup, then one per interval tick, until
/// [`shutdown`] is called. An in-flight remote call is never interrupted;
/// a cycle still running at process teardown is simply abandoned.
///
/// [`shutdown`]: SyncScheduler::shutdown
pub struct SyncScheduler {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl SyncScheduler {
    /// Spawn the periodic task over the given engine.
    #[must_use]
    pub fn spawn(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        engine.run_sync_cycle().await;
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Sync scheduler stopped");
        });

        Self { handle, shutdown }
    }

    /// Stop the periodic loop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QuoteStore;
    use crate::sync::{SyncConfig, SyncEvent};
    use tokio::sync::mpsc;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_scheduler_runs_cycles_and_shuts_down() {
        let store = Arc::new(QuoteStore::open_in_memory().await.unwrap());

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let engine = Arc::new(
            SyncEngine::new(
                Arc::clone(&store),
                SyncConfig::new("http://127.0.0.1:1/posts"),
            )
            .unwrap()
            .with_events(events_tx),
        );

        let scheduler = SyncScheduler::spawn(Arc::clone(&engine), Duration::from_millis(10));

        // The endpoint is unreachable, so cycles surface as CycleFailed;
        // at least the immediate startup cycle plus one tick must arrive.
        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(5), events_rx.recv())
                .await
                .expect("expected a sync event before timeout");
            assert!(matches!(event, Some(SyncEvent::CycleFailed(_))));
        }

        tokio::time::timeout(Duration::from_secs(5), scheduler.shutdown())
            .await
            .expect("shutdown should not hang");
    }
}
