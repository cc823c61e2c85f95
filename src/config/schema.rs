//! Configuration schema types
//!
//! This module defines the configuration structure for PriceBatch. Every
//! section is optional in the TOML file and falls back to its defaults.

use serde::{Deserialize, Serialize};

/// Largest accepted autosave debounce
pub const MAX_AUTOSAVE_DEBOUNCE_MS: u64 = 60_000;

/// Main PriceBatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Batch persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog snapshot source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.catalog.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Batch persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every batch
    #[serde(default = "default_batches_path")]
    pub batches_path: String,

    /// Write-behind coalescing window; 0 saves on every change
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batches_path.trim().is_empty() {
            return Err("storage.batches_path cannot be empty".to_string());
        }
        if self.autosave_debounce_ms > MAX_AUTOSAVE_DEBOUNCE_MS {
            return Err(format!(
                "storage.autosave_debounce_ms must be <= {MAX_AUTOSAVE_DEBOUNCE_MS}"
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            batches_path: default_batches_path(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
        }
    }
}

/// Catalog snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON snapshot of catalog records
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Fail instead of running without a catalog
    #[serde(default)]
    pub required: bool,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.required && self.path.trim().is_empty() {
            return Err("catalog.path cannot be empty when catalog.required = true".to_string());
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            required: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving exported files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Appended to the sanitized batch name to form the file name
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.file_suffix.is_empty() {
            return Err("export.file_suffix cannot be empty".to_string());
        }
        if self.file_suffix.contains(['/', '\\']) {
            return Err(format!(
                "export.file_suffix '{}' must not contain path separators",
                self.file_suffix
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_suffix: default_file_suffix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_batches_path() -> String {
    "data/batches.json".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    500
}

fn default_catalog_path() -> String {
    "data/master_items.json".to_string()
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_file_suffix() -> String {
    "_price_batch.csv".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.storage.batches_path, "data/batches.json");
        assert_eq!(config.storage.autosave_debounce_ms, 500);
        assert_eq!(config.catalog.path, "data/master_items.json");
        assert!(!config.catalog.required);
        assert_eq!(config.export.output_dir, "exports");
        assert_eq!(config.export.file_suffix, "_price_batch.csv");
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn test_debounce_upper_bound() {
        let mut config = AppConfig::default();
        config.storage.autosave_debounce_ms = MAX_AUTOSAVE_DEBOUNCE_MS;
        assert!(config.validate().is_ok());
        config.storage.autosave_debounce_ms = MAX_AUTOSAVE_DEBOUNCE_MS + 1;
        assert!(config.validate().unwrap_err().contains("autosave_debounce_ms"));
    }

    #[test]
    fn test_zero_debounce_is_allowed() {
        let mut config = AppConfig::default();
        config.storage.autosave_debounce_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_required_catalog_needs_path() {
        let mut config = AppConfig::default();
        config.catalog.required = true;
        config.catalog.path = " ".to_string();
        assert!(config.validate().unwrap_err().contains("catalog.path"));
    }

    #[test]
    fn test_file_suffix_rejects_separators() {
        let mut config = AppConfig::default();
        config.export.file_suffix = "/x.csv".to_string();
        assert!(config.validate().unwrap_err().contains("file_suffix"));
    }

    #[test]
    fn test_rotation_values() {
        let mut config = AppConfig::default();
        config.logging.local_rotation = "hourly".to_string();
        assert!(config.validate().is_ok());
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().unwrap_err().contains("local_rotation"));
    }
}
