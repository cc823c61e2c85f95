//! Configuration management for PriceBatch.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! PriceBatch uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PRICEBATCH_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pricebatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pricebatch.toml")?;
//!
//! println!("Batches: {}", config.storage.batches_path);
//! println!("Exports: {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StorageConfig`] - Batch file and autosave debounce
//! - [`CatalogConfig`] - Catalog snapshot path and whether it is required
//! - [`ExportConfig`] - Output directory and file suffix
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! batches_path = "data/batches.json"
//! autosave_debounce_ms = 500
//!
//! [catalog]
//! path = "${PRICEBATCH_DATA}/master_items.json"
//! required = false
//!
//! [export]
//! output_dir = "exports"
//! file_suffix = "_price_batch.csv"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    AppConfig, ApplicationConfig, CatalogConfig, ExportConfig, LoggingConfig, StorageConfig,
};
