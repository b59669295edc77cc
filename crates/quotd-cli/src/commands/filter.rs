use std::path::Path;

use crate::commands::common::{normalize_text, open_store};
use crate::error::CliError;

pub async fn run_filter(category: &str, db_path: &Path) -> Result<(), CliError> {
    let category = normalize_text(category).ok_or(CliError::EmptyCategory)?;

    let store = open_store(db_path).await?;
    store.set_selected_category(&category).await?;

    println!("Active category filter: {category}");
    Ok(())
}
