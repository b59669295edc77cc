use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use quotd_core::sync::{SyncConfig, SyncEngine};
use quotd_core::{Quote, QuoteStore};

use crate::error::CliError;

pub const DB_PATH_ENV: &str = "QUOTD_DB_PATH";
pub const SYNC_URL_ENV: &str = "QUOTD_SYNC_URL";
pub const SYNC_INTERVAL_ENV: &str = "QUOTD_SYNC_INTERVAL_SECS";

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os(DB_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotd")
        .join("quotd.db")
}

pub async fn open_store(path: &Path) -> Result<Arc<QuoteStore>, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Arc::new(QuoteStore::open(path).await?))
}

/// Sync configuration from the environment, when `QUOTD_SYNC_URL` is set.
pub fn sync_config_from_env() -> Option<SyncConfig> {
    let url = env::var(SYNC_URL_ENV).ok()?;
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let mut config = SyncConfig::new(url);
    if let Some(interval) = env::var(SYNC_INTERVAL_ENV)
        .ok()
        .and_then(|raw| parse_interval_secs(&raw))
    {
        config = config.with_interval(interval);
    }
    Some(config)
}

pub fn parse_interval_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

pub fn sync_engine(store: &Arc<QuoteStore>) -> Result<Option<SyncEngine>, CliError> {
    match sync_config_from_env() {
        Some(config) => Ok(Some(SyncEngine::new(Arc::clone(store), config)?)),
        None => Ok(None),
    }
}

pub fn require_sync_engine(store: &Arc<QuoteStore>) -> Result<SyncEngine, CliError> {
    sync_engine(store)?.ok_or(CliError::SyncNotConfigured)
}

pub fn resolve_quote_text(text_parts: &[String]) -> Result<String, CliError> {
    normalize_text(&text_parts.join(" ")).ok_or(CliError::EmptyQuoteText)
}

pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn format_quote_lines(quotes: &[Quote]) -> Vec<String> {
    quotes.iter().map(ToString::to_string).collect()
}

pub fn format_sync_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
