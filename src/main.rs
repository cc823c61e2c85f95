// PriceBatch - Retail price-change batch validation and export
// Copyright (c) 2025 PriceBatch Contributors
// Licensed under the MIT License

use clap::Parser;
use pricebatch::cli::{Cli, Commands};
use pricebatch::config::{load_config, AppConfig};
use pricebatch::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config when it loads; commands report
    // config errors themselves, so a broken file falls back to defaults here
    let config = load_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_else(|| AppConfig::default().logging);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "PriceBatch - Retail price-change batch validation and export"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::New(args) => args.execute(&cli.config).await,
        Commands::List(args) => args.execute(&cli.config).await,
        Commands::Duplicate(args) => args.execute(&cli.config).await,
        Commands::Delete(args) => args.execute(&cli.config).await,
        Commands::AddUpcs(args) => args.execute(&cli.config).await,
        Commands::Apply(args) => args.execute(&cli.config).await,
        Commands::RemoveLine(args) => args.execute(&cli.config).await,
        Commands::Refresh(args) => args.execute(&cli.config).await,
        Commands::Search(args) => args.execute(&cli.config).await,
        Commands::Validate(args) => args.execute(&cli.config).await,
        Commands::Export(args) => args.execute(&cli.config).await,
    }
}
