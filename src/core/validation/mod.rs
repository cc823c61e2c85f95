//! Line and batch validation
//!
//! Validation never fails: defects come back as [`ValidationIssue`]s. The only
//! side effect is promo-quantity normalization, applied to the line passed to
//! [`validate_line`] and to private copies inside [`validate_batch`].
//!
//! [`ValidationIssue`]: crate::domain::ValidationIssue

pub mod batch;
pub mod line;

pub use batch::{validate_batch, BatchReport};
pub use line::{validate_line, validate_line_copy, LineValidation, UPC_DIGIT_RANGE};
