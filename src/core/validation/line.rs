//! Single-line validation
//!
//! Rules run in a fixed order so diagnostics read the same way every time:
//!
//! 1. record type is one of SALE, TPR, INSTORE, REG
//! 2. UPC has digits and a raw digit count within 12..=14
//! 3. UPC is in the catalog (only when a catalog is loaded and rule 2 passed)
//! 4. promotional lines carry a positive promo price and both dates
//! 5. end date does not sort before start date
//! 6. promo quantity defaults to 1 (normalization, never an issue)

use crate::core::catalog::Catalog;
use crate::core::upc::{canonicalize, digits};
use crate::domain::issue::{IssueCode, ValidationIssue};
use crate::domain::line::{Line, RecordType};
use std::ops::RangeInclusive;

/// Accepted raw digit counts for a UPC (UPC-A, EAN-13, GTIN-14)
pub const UPC_DIGIT_RANGE: RangeInclusive<usize> = 12..=14;

/// Issues for one line together with its normalized copy
#[derive(Debug, Clone, PartialEq)]
pub struct LineValidation {
    pub issues: Vec<ValidationIssue>,
    pub normalized: Line,
}

impl LineValidation {
    /// True when the line has no issues
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validates `line` in place
///
/// `index` is the 0-based position of the line in its batch. `catalog` is
/// `None` when no catalog is loaded, which skips the membership rule instead
/// of failing every UPC.
///
/// The promo quantity of `line` is rewritten to `"1"` when it is not a
/// positive integer, whatever other issues are found. Pass a copy (or use
/// [`validate_line_copy`]) when the caller's line must stay untouched.
///
/// # Examples
///
/// ```
/// use pricebatch::core::validation::validate_line;
/// use pricebatch::domain::{IssueCode, Line};
///
/// let mut line = Line {
///     record_type: "REG".to_string(),
///     upc: "012345678905".to_string(),
///     ..Line::blank()
/// };
/// assert!(validate_line(&mut line, 0, None).is_empty());
/// assert_eq!(line.promo_qty, "1");
/// ```
pub fn validate_line(
    line: &mut Line,
    index: usize,
    catalog: Option<&Catalog>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if RecordType::parse(line.record_type.trim()).is_none() {
        issues.push(ValidationIssue::new(index, IssueCode::RecordTypeInvalid));
    }

    let upc = canonicalize(&line.upc);
    let digit_count = digits(&line.upc).len();
    if upc.is_empty() || !UPC_DIGIT_RANGE.contains(&digit_count) {
        issues.push(ValidationIssue::new(index, IssueCode::UpcInvalid));
    } else if let Some(catalog) = catalog {
        if !catalog.contains(&upc) {
            issues.push(ValidationIssue::new(index, IssueCode::UpcNotInCatalog));
        }
    }

    let start = line.start_date.trim();
    let end = line.end_date.trim();

    if line.needs_promo() {
        if !line.promo_price_value().is_some_and(|p| p > 0.0) {
            issues.push(ValidationIssue::new(index, IssueCode::PromoPriceRequired));
        }
        if start.is_empty() {
            issues.push(ValidationIssue::new(index, IssueCode::StartDateRequired));
        }
        if end.is_empty() {
            issues.push(ValidationIssue::new(index, IssueCode::EndDateRequired));
        }
    }

    // ISO dates compare lexicographically in chronological order
    if !start.is_empty() && !end.is_empty() && end < start {
        issues.push(ValidationIssue::new(index, IssueCode::DateRangeInverted));
    }

    if line.promo_qty_value().is_none() {
        line.promo_qty = "1".to_string();
    }

    issues
}

/// Validates a copy of `line`, leaving the original untouched
pub fn validate_line_copy(line: &Line, index: usize, catalog: Option<&Catalog>) -> LineValidation {
    let mut normalized = line.clone();
    let issues = validate_line(&mut normalized, index, catalog);
    LineValidation { issues, normalized }
}
