//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::PriceBatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "PRICEBATCH_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (PRICEBATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PriceBatchError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or a
/// value fails validation.
///
/// # Examples
///
/// ```no_run
/// use pricebatch::config::loader::load_config;
///
/// let config = load_config("pricebatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PriceBatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PriceBatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents, |key| std::env::var(key).ok())
}

/// Parses configuration text
///
/// `lookup` resolves both `${VAR}` placeholders and `PRICEBATCH_*` overrides,
/// so callers can supply variables without touching the process
/// environment.
///
/// # Errors
///
/// Same as [`load_config`], minus the file errors.
pub fn parse_config<F>(contents: &str, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let contents = substitute_env_vars(contents, &lookup)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| PriceBatchError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config, &lookup);

    config.validate().map_err(|e| {
        PriceBatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PriceBatchError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PriceBatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies overrides named `PRICEBATCH_<SECTION>_<KEY>`
///
/// For example `PRICEBATCH_EXPORT_OUTPUT_DIR` or
/// `PRICEBATCH_STORAGE_AUTOSAVE_DEBOUNCE_MS`. Unparseable numeric or boolean
/// values are ignored with a warning.
fn apply_env_overrides<F>(config: &mut AppConfig, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

    // Application overrides
    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Some(val) = var("STORAGE_BATCHES_PATH") {
        config.storage.batches_path = val;
    }
    if let Some(val) = var("STORAGE_AUTOSAVE_DEBOUNCE_MS") {
        match val.parse() {
            Ok(ms) => config.storage.autosave_debounce_ms = ms,
            Err(_) => tracing::warn!(value = %val, "Ignoring invalid autosave_debounce_ms override"),
        }
    }

    // Catalog overrides
    if let Some(val) = var("CATALOG_PATH") {
        config.catalog.path = val;
    }
    if let Some(val) = var("CATALOG_REQUIRED") {
        match val.parse() {
            Ok(required) => config.catalog.required = required,
            Err(_) => tracing::warn!(value = %val, "Ignoring invalid catalog.required override"),
        }
    }

    // Export overrides
    if let Some(val) = var("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = var("EXPORT_FILE_SUFFIX") {
        config.export.file_suffix = val;
    }

    // Logging overrides
    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        match val.parse() {
            Ok(enabled) => config.logging.local_enabled = enabled,
            Err(_) => tracing::warn!(value = %val, "Ignoring invalid logging.local_enabled override"),
        }
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
