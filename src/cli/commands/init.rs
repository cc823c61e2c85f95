//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "pricebatch.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PriceBatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Place a catalog snapshot at the [catalog] path (optional)");
                println!("  3. Validate configuration: pricebatch validate-config");
                println!("  4. Create a batch: pricebatch new \"Weekly ad\"");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}

/// Commented sample configuration with every default spelled out
pub fn sample_config() -> &'static str {
    r#"# PriceBatch Configuration File
# Retail price-change batch validation and export
#
# Values may reference environment variables as ${VAR_NAME}.
# Any key can be overridden with PRICEBATCH_<SECTION>_<KEY>,
# e.g. PRICEBATCH_EXPORT_OUTPUT_DIR=/srv/exports

[application]
log_level = "info"  # trace | debug | info | warn | error

[storage]
# All batches live in one JSON file
batches_path = "data/batches.json"
# Edits are coalesced for this long before saving (0 = save every change)
autosave_debounce_ms = 500

[catalog]
# JSON array of {"upc", "brand", "description", "reg_price"} records
path = "data/master_items.json"
# When false, a missing catalog only disables the UPC membership check
required = false

[export]
output_dir = "exports"
file_suffix = "_price_batch.csv"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let config = parse_config(sample_config(), |_| None).unwrap();
        assert_eq!(config.storage.batches_path, "data/batches.json");
        assert_eq!(config.export.file_suffix, "_price_batch.csv");
        assert!(!config.catalog.required);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("pricebatch.toml");
        fs::write(&output, "# mine").unwrap();

        let args = InitArgs {
            output: output.display().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# mine");

        let args = InitArgs {
            output: output.display().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[export]"));
    }
}
