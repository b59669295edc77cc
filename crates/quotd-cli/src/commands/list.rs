use std::path::Path;

use quotd_core::store::filter_by_category;

use crate::commands::common::{format_quote_lines, open_store};
use crate::error::CliError;

pub async fn run_list(
    category: Option<&str>,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let snapshot = store.snapshot();
    let quotes = match category {
        Some(category) => filter_by_category(&snapshot, category),
        None => snapshot,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
    } else {
        for line in format_quote_lines(&quotes) {
            println!("{line}");
        }
    }

    Ok(())
}
