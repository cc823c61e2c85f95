//! Domain error types
//!
//! This module defines the error hierarchy for PriceBatch. Validation defects
//! are deliberately absent: they are returned as data
//! ([`ValidationIssue`](crate::domain::ValidationIssue) lists), never raised.

use crate::domain::issue::ValidationIssue;
use thiserror::Error;

/// Main PriceBatch error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PriceBatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Batch persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Catalog snapshot errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Invalid input to an operation (not a line defect)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Export refused; carries every validation issue
    #[error(transparent)]
    Refused(#[from] ExportRefusal),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Batch store errors
///
/// Errors raised by the persistence collaborator. They never carry
/// serde or filesystem types directly.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No batch with the given id or name
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// Another batch already uses this name (case-insensitive)
    #[error("Batch name already exists: {0}")]
    DuplicateName(String),

    /// Empty or whitespace-only batch name
    #[error("Invalid batch name: {0}")]
    InvalidName(String),

    /// The backing file could not be read
    #[error("Failed to read batch store: {0}")]
    ReadFailed(String),

    /// The backing file could not be written
    #[error("Failed to write batch store: {0}")]
    WriteFailed(String),

    /// The backing file exists but does not hold a batch array
    #[error("Batch store is corrupt: {0}")]
    Corrupt(String),
}

/// Catalog snapshot errors
///
/// These are environment failures. Callers usually log them and continue
/// with no catalog loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Snapshot file missing
    #[error("Catalog snapshot not found: {0}")]
    NotFound(String),

    /// Snapshot file unreadable
    #[error("Failed to read catalog snapshot: {0}")]
    ReadFailed(String),

    /// Snapshot is not a JSON array of catalog records
    #[error("Failed to parse catalog snapshot: {0}")]
    ParseFailed(String),
}

/// Export refused because the batch has validation issues
///
/// Carries every issue so callers can report which lines failed and why.
#[derive(Debug, Clone, Error)]
#[error("Export refused: {} validation issue(s) in batch", .issues.len())]
pub struct ExportRefusal {
    /// All issues reported by batch validation, in line order
    pub issues: Vec<ValidationIssue>,
}

impl ExportRefusal {
    /// Creates a refusal from a non-empty issue list
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Distinct 1-based line numbers that failed, ascending
    pub fn failed_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self.issues.iter().map(|i| i.line_number()).collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PriceBatchError {
    fn from(err: std::io::Error) -> Self {
        PriceBatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PriceBatchError {
    fn from(err: serde_json::Error) -> Self {
        PriceBatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PriceBatchError {
    fn from(err: toml::de::Error) -> Self {
        PriceBatchError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for PriceBatchError {
    fn from(err: csv::Error) -> Self {
        PriceBatchError::Export(format!("CSV write error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::IssueCode;

    #[test]
    fn test_error_display() {
        let err = PriceBatchError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::BatchNotFound("abc".to_string());
        let err: PriceBatchError = store_err.into();
        assert!(matches!(err, PriceBatchError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: Batch not found: abc");
    }

    #[test]
    fn test_catalog_error_conversion() {
        let catalog_err = CatalogError::ParseFailed("expected array".to_string());
        let err: PriceBatchError = catalog_err.into();
        assert!(matches!(err, PriceBatchError::Catalog(_)));
    }

    #[test]
    fn test_export_refusal_lines() {
        let refusal = ExportRefusal::new(vec![
            ValidationIssue::new(0, IssueCode::RecordTypeInvalid),
            ValidationIssue::new(0, IssueCode::UpcInvalid),
            ValidationIssue::new(3, IssueCode::EndDateRequired),
        ]);
        assert_eq!(refusal.failed_lines(), vec![1, 4]);
        assert_eq!(
            refusal.to_string(),
            "Export refused: 3 validation issue(s) in batch"
        );
    }

    #[test]
    fn test_refusal_keeps_issues_when_converted() {
        let refusal = ExportRefusal::new(vec![ValidationIssue::new(2, IssueCode::UpcInvalid)]);
        let err: PriceBatchError = refusal.into();
        match err {
            PriceBatchError::Refused(r) => assert_eq!(r.failed_lines(), vec![3]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PriceBatchError = io_err.into();
        assert!(matches!(err, PriceBatchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PriceBatchError = json_err.into();
        assert!(matches!(err, PriceBatchError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PriceBatchError = toml_err.into();
        assert!(matches!(err, PriceBatchError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = PriceBatchError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let _: &dyn std::error::Error = &ExportRefusal::new(vec![]);
    }
}
