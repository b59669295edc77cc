use std::path::Path;

use quotd_core::store::{distinct_categories, ALL_CATEGORIES};

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_categories(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;

    // The "all" sentinel heads the selection list; the store itself does not
    // add it.
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    categories.extend(distinct_categories(&store.snapshot()));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        for category in categories {
            println!("{category}");
        }
    }

    Ok(())
}
