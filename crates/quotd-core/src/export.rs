//! Quote collection JSON import/export helpers.
//!
//! The interchange format is a JSON array of `{text, category}` objects,
//! identical to the persisted snapshot format.

use thiserror::Error;

use crate::models::{Quote, ValidationError};

/// Default file name for exported collections.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Failures when importing a quote collection from a file payload.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload is not a JSON array of `{text, category}` objects
    #[error("Invalid JSON import: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Strict mode rejected an entry (empty text or category after trimming)
    #[error("Invalid quote at entry {index}: {reason}")]
    InvalidEntry {
        /// Zero-based position in the imported array
        index: usize,
        /// What was wrong with the entry
        reason: ValidationError,
    },
}

/// Render quotes as pretty-printed JSON.
pub fn render_json_export(quotes: &[Quote]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quotes)
}

/// Parse an imported payload into quotes, verbatim.
///
/// Entries are not validated or de-duplicated here; strict-mode checks live
/// in the store so they can see the existing collection.
pub fn parse_import(payload: &str) -> Result<Vec<Quote>, ImportError> {
    Ok(serde_json::from_str(payload)?)
}
