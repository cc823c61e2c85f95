//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for PriceBatch using clap.

pub mod commands;
pub mod context;

use clap::{Parser, Subcommand};

/// PriceBatch - Retail price-change batch validation and export
#[derive(Parser, Debug)]
#[command(name = "pricebatch")]
#[command(version, about, long_about = None)]
#[command(author = "PriceBatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pricebatch.toml", env = "PRICEBATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRICEBATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate_config::ValidateConfigArgs),

    /// Create an empty batch
    New(commands::batch::NewArgs),

    /// List stored batches, most recently changed first
    List(commands::batch::ListArgs),

    /// Copy a batch under a free `_COPY` name
    Duplicate(commands::batch::DuplicateArgs),

    /// Delete a batch
    Delete(commands::batch::DeleteArgs),

    /// Add lines for one or more UPCs
    AddUpcs(commands::edit::AddUpcsArgs),

    /// Set fields on every line of a batch
    Apply(commands::edit::ApplyArgs),

    /// Remove one line by its 1-based number
    RemoveLine(commands::edit::RemoveLineArgs),

    /// Re-copy brand, description and reference price from the catalog
    Refresh(commands::edit::RefreshArgs),

    /// Search the catalog by UPC or text
    Search(commands::search::SearchArgs),

    /// Validate a batch and list every issue
    Validate(commands::validate::ValidateArgs),

    /// Export a valid batch as CSV
    Export(commands::export::ExportArgs),
}
