use std::path::Path;

use quotd_core::store::{filter_by_category, random_quote};

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_show(category: Option<&str>, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;

    let category = match category {
        Some(value) => value.to_string(),
        None => store.selected_category().await?,
    };

    let filtered = filter_by_category(&store.snapshot(), &category);
    match random_quote(&filtered) {
        Some(quote) => println!("{quote}"),
        None => println!("No quotes in this category."),
    }

    Ok(())
}
