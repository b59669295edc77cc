use std::path::Path;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_import(path: &Path, strict: bool, db_path: &Path) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(path)?;

    let store = open_store(db_path).await?;
    let appended = store.import(&payload, strict)?;
    store.save().await?;

    println!("Imported {appended} quotes.");
    Ok(())
}
