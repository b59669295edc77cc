use std::io;

use quotd_core::export::ImportError;
use quotd_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quotd_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("No quote text provided")]
    EmptyQuoteText,
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Sync is not configured. Set QUOTD_SYNC_URL to enable server sync.")]
    SyncNotConfigured,
}
