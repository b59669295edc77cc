//! Remote quote synchronization.
//!
//! `SyncEngine` reconciles the local collection with quotes fetched from a
//! remote endpoint. The merge policy is additive-only: a remote quote is
//! appended iff no quote with equal text is already present, and remote data
//! never overwrites or removes a local quote.

mod scheduler;

pub use scheduler::SyncScheduler;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::Quote;
use crate::store::QuoteStore;

/// Canonical period between automatic sync cycles
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// How many remote entries are consumed per fetch
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// Category synthesized for remote quotes (the remote schema carries none)
pub const REMOTE_CATEGORY: &str = "Server";

/// Errors from talking to the remote endpoint.
///
/// Never retried and never fatal; the caller logs or emits a notification
/// event and moves on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network, HTTP, or decode failure while fetching remote quotes
    #[error("Fetching quotes from the server failed: {0}")]
    FetchFailed(String),

    /// Network or HTTP failure while pushing a local quote
    #[error("Pushing quote to the server failed: {0}")]
    PushFailed(String),
}

/// One entry of the remote payload. Extra fields are ignored; only `title`
/// is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteQuote {
    pub title: String,
}

/// Sync engine configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Remote endpoint serving and accepting quotes
    pub url: String,
    /// Period between automatic sync cycles
    pub interval: Duration,
    /// Maximum remote entries consumed per fetch
    pub fetch_limit: usize,
}

impl SyncConfig {
    /// Create a configuration with the canonical interval and fetch limit
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            interval: DEFAULT_SYNC_INTERVAL,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Set the automatic sync interval
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the per-fetch entry limit
    #[must_use]
    pub const fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }
}

/// Notification-worthy sync outcomes, mirrored to `tracing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// New quotes were merged in from the server
    Updated {
        /// How many quotes were appended
        added: usize,
    },
    /// A sync cycle failed (fetch or persist); the periodic timer keeps
    /// running
    CycleFailed(String),
    /// Pushing a locally added quote failed
    PushFailed(String),
}

/// Outcome of one sync cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    /// Remote entries consumed (post fetch limit)
    pub fetched: usize,
    /// Quotes appended by the merge
    pub added: usize,
    /// False when the cycle was abandoned on a fetch or persist failure
    pub succeeded: bool,
    /// Completion time (Unix ms)
    pub completed_at: i64,
}

impl SyncSummary {
    fn completed(fetched: usize, added: usize) -> Self {
        Self {
            fetched,
            added,
            succeeded: true,
            completed_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    fn failed() -> Self {
        Self {
            fetched: 0,
            added: 0,
            succeeded: false,
            completed_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Result of merging remote quotes into a local collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// The unioned collection, local order preserved, appends at the end
    pub merged: Vec<Quote>,
    /// True iff at least one remote quote was appended
    pub changed: bool,
    /// How many remote quotes were appended
    pub added: usize,
}

/// Map a remote entry to a quote, synthesizing the `"Server"` category.
#[must_use]
pub fn to_quote(dto: RemoteQuote) -> Quote {
    Quote {
        text: dto.title,
        category: REMOTE_CATEGORY.to_string(),
    }
}

/// Union a local collection with remote quotes, keyed by text equality.
///
/// Existing local quotes are never removed or mutated; remote entries only
/// fill gaps. Remote entries whose text repeats an already-appended one are
/// dropped, keeping the no-duplicate-text invariant over the result.
#[must_use]
pub fn merge(local: &[Quote], remote: &[Quote]) -> MergeResult {
    let mut known: HashSet<String> = local.iter().map(|quote| quote.text.clone()).collect();
    let mut merged = local.to_vec();
    let mut added = 0;

    for quote in remote {
        if known.insert(quote.text.clone()) {
            merged.push(quote.clone());
            added += 1;
        }
    }

    MergeResult {
        merged,
        changed: added > 0,
        added,
    }
}

/// Reconciles the local quote store with a remote endpoint.
pub struct SyncEngine {
    store: Arc<QuoteStore>,
    config: SyncConfig,
    client: reqwest::Client,
    events: Option<mpsc::UnboundedSender<SyncEvent>>,
}

impl SyncEngine {
    /// Create an engine over the given store and configuration
    pub fn new(store: Arc<QuoteStore>, config: SyncConfig) -> crate::Result<Self> {
        Ok(Self {
            store,
            config,
            client: reqwest::Client::builder().build()?,
            events: None,
        })
    }

    /// Attach a channel receiving notification events
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The engine's configuration
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetch remote entries, truncated to the fetch limit.
    ///
    /// No retry and no backoff; a failed fetch is reported and the next
    /// cycle starts from scratch.
    pub async fn fetch_remote(&self) -> Result<Vec<RemoteQuote>, SyncError> {
        let response = self
            .client
            .get(&self.config.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| SyncError::FetchFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::FetchFailed(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let mut entries = response
            .json::<Vec<RemoteQuote>>()
            .await
            .map_err(|error| SyncError::FetchFailed(error.to_string()))?;
        entries.truncate(self.config.fetch_limit);
        Ok(entries)
    }

    /// Send one quote to the remote endpoint (fire-and-forget create).
    ///
    /// The response body is ignored beyond success/failure.
    pub async fn push_local(&self, quote: &Quote) -> Result<(), SyncError> {
        let response = self
            .client
            .post(&self.config.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(quote)
            .send()
            .await
            .map_err(|error| SyncError::PushFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::PushFailed(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        Ok(())
    }

    /// One fetch-merge-save pass against the current store snapshot.
    ///
    /// Always completes: fetch and persist failures are swallowed into a
    /// `CycleFailed` event and a log line, so a periodic caller is never
    /// broken by one bad cycle.
    pub async fn run_sync_cycle(&self) -> SyncSummary {
        let remote = match self.fetch_remote().await {
            Ok(remote) => remote,
            Err(error) => {
                tracing::warn!("Sync cycle failed: {error}");
                self.emit(SyncEvent::CycleFailed(error.to_string()));
                return SyncSummary::failed();
            }
        };

        let fetched = remote.len();
        let remote: Vec<Quote> = remote.into_iter().map(to_quote).collect();
        let result = merge(&self.store.snapshot(), &remote);

        if result.changed {
            let added = result.added;
            self.store.replace_all(result.merged);
            if let Err(error) = self.store.save().await {
                tracing::warn!("Failed to persist merged quotes: {error}");
                self.emit(SyncEvent::CycleFailed(error.to_string()));
                return SyncSummary::failed();
            }

            tracing::info!(added, "Quotes updated from server");
            self.emit(SyncEvent::Updated { added });
            return SyncSummary::completed(fetched, added);
        }

        SyncSummary::completed(fetched, 0)
    }

    /// Push a just-added quote, then run one sync cycle.
    ///
    /// A failed push is surfaced as a `PushFailed` event and not retried;
    /// the fetch-merge pass runs regardless.
    pub async fn sync_after_add(&self, quote: &Quote) -> SyncSummary {
        if let Err(error) = self.push_local(quote).await {
            tracing::warn!("Push after add failed: {error}");
            self.emit(SyncEvent::PushFailed(error.to_string()));
        }

        self.run_sync_cycle().await
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
