//! quotd CLI - Manage a synced quote collection from the command line

mod cli;
mod commands;
mod error;

use std::time::Duration;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_db_path;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quotd_core=info".parse().unwrap())
                .add_directive("quotd_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Show { category } => {
            commands::show::run_show(category.as_deref(), &db_path).await
        }
        Commands::Add { text, category } => {
            commands::add::run_add(&text, &category, &db_path).await
        }
        Commands::List { category, json } => {
            commands::list::run_list(category.as_deref(), json, &db_path).await
        }
        Commands::Categories { json } => commands::categories::run_categories(json, &db_path).await,
        Commands::Filter { category } => commands::filter::run_filter(&category, &db_path).await,
        Commands::Import { path, strict } => {
            commands::import::run_import(&path, strict, &db_path).await
        }
        Commands::Export { output } => {
            commands::export::run_export(output.as_deref(), &db_path).await
        }
        Commands::Sync => commands::sync::run_sync(&db_path).await,
        Commands::Watch { interval_secs } => {
            commands::watch::run_watch(interval_secs.map(Duration::from_secs), &db_path).await
        }
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
    }
}
