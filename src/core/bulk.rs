//! Bulk batch edits
//!
//! These are the mutations behind the CLI's batch editing commands. Each
//! one that changes the batch calls [`Batch::touch`]; persisting the result
//! is up to the caller.

use crate::core::catalog::Catalog;
use crate::core::upc::canonicalize;
use crate::domain::errors::PriceBatchError;
use crate::domain::{Batch, Line, RecordType, Result};

/// Result of [`add_upcs`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Lines filled or appended
    pub added: usize,
    /// Existing lines replaced because they held the same canonical UPC
    pub replaced: usize,
    /// Tokens without any digits
    pub skipped: usize,
    /// New lines whose UPC was found in the catalog
    pub matched: usize,
}

/// Fields set by [`apply_to_all`]; `None` or empty text leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkFields {
    pub record_type: Option<RecordType>,
    pub promo_price: Option<String>,
    pub promo_qty: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl BulkFields {
    /// True when applying these fields would change nothing
    pub fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && [
                &self.promo_price,
                &self.promo_qty,
                &self.start_date,
                &self.end_date,
            ]
            .iter()
            .all(|f| non_empty(f).is_none())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Splits pasted UPC text on whitespace and commas
///
/// ```
/// use pricebatch::core::bulk::parse_upc_tokens;
///
/// assert_eq!(
///     parse_upc_tokens("012345678905, 4006381333931\n\n42"),
///     vec!["012345678905", "4006381333931", "42"]
/// );
/// ```
pub fn parse_upc_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Adds one line per UPC token
///
/// Each new line gets `record_type`, the canonical UPC and, when the catalog
/// knows the UPC, its brand, description and reference price. A line that
/// already holds the same canonical UPC is replaced; otherwise the first
/// blank line is filled, otherwise the line is appended. Once the batch has
/// more than one line, a leading line with no UPC is dropped.
pub fn add_upcs<I, S>(
    batch: &mut Batch,
    tokens: I,
    record_type: RecordType,
    catalog: Option<&Catalog>,
) -> AddOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcome = AddOutcome::default();

    for token in tokens {
        let upc = canonicalize(token.as_ref());
        if upc.is_empty() {
            outcome.skipped += 1;
            continue;
        }

        let mut line = Line {
            record_type: record_type.as_str().to_string(),
            upc: upc.as_str().to_string(),
            ..Line::blank()
        };
        if let Some(item) = catalog.and_then(|c| c.lookup(&upc)) {
            line.apply_catalog_item(item);
            outcome.matched += 1;
        }

        if let Some(existing) = batch.lines.iter_mut().find(|l| l.canonical_upc() == upc) {
            *existing = line;
            outcome.replaced += 1;
        } else if let Some(blank) = batch.lines.iter_mut().find(|l| l.is_blank()) {
            *blank = line;
            outcome.added += 1;
        } else {
            batch.lines.push(line);
            outcome.added += 1;
        }
    }

    if batch.lines.len() > 1 && batch.lines[0].upc.trim().is_empty() {
        batch.lines.remove(0);
    }

    if outcome.added + outcome.replaced > 0 {
        batch.touch();
    }
    tracing::debug!(
        batch_id = %batch.id,
        added = outcome.added,
        replaced = outcome.replaced,
        skipped = outcome.skipped,
        "UPCs added"
    );
    outcome
}

/// Sets the given fields on every line; returns the number of lines changed
pub fn apply_to_all(batch: &mut Batch, fields: &BulkFields) -> usize {
    if fields.is_empty() {
        return 0;
    }

    let mut changed = 0;
    for line in &mut batch.lines {
        let before = line.clone();
        if let Some(rt) = fields.record_type {
            line.record_type = rt.as_str().to_string();
        }
        if let Some(v) = non_empty(&fields.promo_price) {
            line.promo_price = v.to_string();
        }
        if let Some(v) = non_empty(&fields.promo_qty) {
            line.promo_qty = v.to_string();
        }
        if let Some(v) = non_empty(&fields.start_date) {
            line.start_date = v.to_string();
        }
        if let Some(v) = non_empty(&fields.end_date) {
            line.end_date = v.to_string();
        }
        if *line != before {
            changed += 1;
        }
    }

    if changed > 0 {
        batch.touch();
    }
    changed
}

/// Re-copies catalog fields onto every line whose UPC the catalog knows
///
/// Lines with unknown UPCs keep their cached fields. Returns the number of
/// lines refreshed.
pub fn refresh_from_catalog(batch: &mut Batch, catalog: &Catalog) -> usize {
    let mut refreshed = 0;
    for line in &mut batch.lines {
        if let Some(item) = catalog.lookup(&line.canonical_upc()) {
            line.apply_catalog_item(item);
            refreshed += 1;
        }
    }
    if refreshed > 0 {
        batch.touch();
    }
    refreshed
}

/// Removes the line at 1-based `position`, as numbered in diagnostics
///
/// A batch never ends up empty: removing the last line leaves one blank line.
///
/// # Errors
///
/// Returns [`PriceBatchError::Validation`] if `position` is out of range.
pub fn remove_line(batch: &mut Batch, position: usize) -> Result<Line> {
    if position == 0 || position > batch.lines.len() {
        return Err(PriceBatchError::Validation(format!(
            "Line {} does not exist (batch has {} line(s))",
            position,
            batch.lines.len()
        )));
    }

    let removed = batch.lines.remove(position - 1);
    if batch.lines.is_empty() {
        batch.lines.push(Line::blank());
    }
    batch.touch();
    Ok(removed)
}
