//! Validation issue model
//!
//! A [`ValidationIssue`] is a recoverable, user-correctable defect tied to one
//! line of a batch. Issues are recomputed on demand and never persisted.

use serde::Serialize;
use std::fmt;

/// Structured defect code
///
/// Presentation layers switch on the code (or on [`IssueCode::field`]),
/// never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Record type blank or not one of SALE, TPR, INSTORE, REG
    RecordTypeInvalid,
    /// UPC has no digits, or its digit count is outside 12..=14
    UpcInvalid,
    /// Catalog is loaded and the canonical UPC is not in it
    UpcNotInCatalog,
    /// Promotional line without a positive promo price
    PromoPriceRequired,
    /// Promotional line without a start date
    StartDateRequired,
    /// Promotional line without an end date
    EndDateRequired,
    /// End date sorts before start date
    DateRangeInverted,
}

/// Line field a defect points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueField {
    RecordType,
    Upc,
    PromoPrice,
    StartDate,
    EndDate,
}

impl IssueCode {
    /// Stable wire name, e.g. `UPC_NOT_IN_CATALOG`
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::RecordTypeInvalid => "RECORD_TYPE_INVALID",
            IssueCode::UpcInvalid => "UPC_INVALID",
            IssueCode::UpcNotInCatalog => "UPC_NOT_IN_CATALOG",
            IssueCode::PromoPriceRequired => "PROMO_PRICE_REQUIRED",
            IssueCode::StartDateRequired => "START_DATE_REQUIRED",
            IssueCode::EndDateRequired => "END_DATE_REQUIRED",
            IssueCode::DateRangeInverted => "DATE_RANGE_INVERTED",
        }
    }

    /// Canonical message phrase. No phrase occurs inside another.
    pub fn phrase(&self) -> &'static str {
        match self {
            IssueCode::RecordTypeInvalid => "Record Type invalid/blank",
            IssueCode::UpcInvalid => "UPC invalid length",
            IssueCode::UpcNotInCatalog => "UPC not in master list",
            IssueCode::PromoPriceRequired => "Promo_Price required",
            IssueCode::StartDateRequired => "Start_Date required",
            IssueCode::EndDateRequired => "End_Date required",
            IssueCode::DateRangeInverted => "End_Date < Start_Date",
        }
    }

    /// The field a presentation layer should highlight
    pub fn field(&self) -> IssueField {
        match self {
            IssueCode::RecordTypeInvalid => IssueField::RecordType,
            IssueCode::UpcInvalid | IssueCode::UpcNotInCatalog => IssueField::Upc,
            IssueCode::PromoPriceRequired => IssueField::PromoPrice,
            IssueCode::StartDateRequired => IssueField::StartDate,
            IssueCode::EndDateRequired | IssueCode::DateRangeInverted => IssueField::EndDate,
        }
    }

    /// Every code, in rule evaluation order
    pub const ALL: [IssueCode; 7] = [
        IssueCode::RecordTypeInvalid,
        IssueCode::UpcInvalid,
        IssueCode::UpcNotInCatalog,
        IssueCode::PromoPriceRequired,
        IssueCode::StartDateRequired,
        IssueCode::EndDateRequired,
        IssueCode::DateRangeInverted,
    ];
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One defect on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// 0-based position of the line in its batch
    pub line_index: usize,

    /// Structured defect code
    pub code: IssueCode,

    /// Human-readable message, `Line N: <phrase>` with N 1-based
    pub message: String,
}

impl ValidationIssue {
    /// Builds an issue with the canonical message for `code`
    pub fn new(line_index: usize, code: IssueCode) -> Self {
        Self {
            line_index,
            code,
            message: format!("Line {}: {}", line_index + 1, code.phrase()),
        }
    }

    /// 1-based line number as shown in diagnostics
    pub fn line_number(&self) -> usize {
        self.line_index + 1
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
