use std::path::{Path, PathBuf};

use quotd_core::export::{render_json_export, EXPORT_FILE_NAME};

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_export(output_path: Option<&Path>, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let rendered = render_json_export(&store.snapshot())?;

    let path = output_path.map_or_else(|| PathBuf::from(EXPORT_FILE_NAME), Path::to_path_buf);
    std::fs::write(&path, rendered)?;

    println!("{}", path.display());
    Ok(())
}
