//! Validate config command implementation

use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateConfigArgs {}

impl ValidateConfigArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        let catalog_state = if Path::new(&config.catalog.path).exists() {
            "present"
        } else {
            "missing"
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Batch Store: {}", config.storage.batches_path);
        println!(
            "  Autosave Debounce: {} ms",
            config.storage.autosave_debounce_ms
        );
        println!("  Catalog: {} ({catalog_state})", config.catalog.path);
        println!("  Catalog Required: {}", config.catalog.required);
        println!("  Export Directory: {}", config.export.output_dir);
        println!("  Export File Suffix: {}", config.export.file_suffix);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        if config.catalog.required && catalog_state == "missing" {
            println!("⚠️  catalog.required is set but the snapshot file does not exist");
        }
        Ok(0)
    }
}
