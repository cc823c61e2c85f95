//! Domain models and types for PriceBatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`BatchId`], [`CanonicalUpc`])
//! - **Domain models** ([`Batch`], [`Line`], [`RecordType`], [`CatalogItem`])
//! - **Validation issues** ([`ValidationIssue`], [`IssueCode`])
//! - **Error types** ([`PriceBatchError`], [`StoreError`], [`CatalogError`], [`ExportRefusal`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, PriceBatchError>`]. Line defects are
//! not errors; they come back as `Vec<ValidationIssue>`:
//!
//! ```rust
//! use pricebatch::core::validation::validate_batch;
//! use pricebatch::domain::{Batch, IssueCode};
//!
//! let batch = Batch::new("Empty");
//! let issues = validate_batch(&batch, None);
//! assert_eq!(issues[0].code, IssueCode::RecordTypeInvalid);
//! ```

pub mod batch;
pub mod catalog;
pub mod errors;
pub mod ids;
pub mod issue;
pub mod line;
pub mod result;

// Re-export commonly used types for convenience
pub use batch::Batch;
pub use catalog::{CatalogItem, CatalogRecord};
pub use errors::{CatalogError, ExportRefusal, PriceBatchError, StoreError};
pub use ids::{BatchId, CanonicalUpc};
pub use issue::{IssueCode, IssueField, ValidationIssue};
pub use line::{Line, RecordType};
pub use result::Result;
