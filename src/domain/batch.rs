//! Batch model
//!
//! A [`Batch`] is a named, ordered collection of lines destined for one
//! export. Line order is significant: position N in `lines` is "Line N + 1"
//! in every diagnostic and row N + 1 of the export.

use crate::domain::ids::BatchId;
use crate::domain::line::Line;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of price-change lines
///
/// # Examples
///
/// ```
/// use pricebatch::domain::Batch;
///
/// let batch = Batch::new("Weekly ad 2025-06-01");
/// assert_eq!(batch.lines.len(), 1);
/// assert!(batch.lines[0].is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,

    pub name: String,

    #[serde(default)]
    pub lines: Vec<Line>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Creates a batch with a fresh id and a single blank line
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BatchId::generate(),
            name: name.into(),
            lines: vec![Line::blank()],
            updated_at: Utc::now(),
        }
    }

    /// Creates a batch with the given lines, replacing nothing else
    pub fn with_lines(name: impl Into<String>, lines: Vec<Line>) -> Self {
        Self {
            lines,
            ..Self::new(name)
        }
    }

    /// Records a modification
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Copy of this batch under a new id and name
    pub fn duplicate_as(&self, name: impl Into<String>) -> Self {
        Self {
            id: BatchId::generate(),
            name: name.into(),
            lines: self.lines.clone(),
            updated_at: Utc::now(),
        }
    }

    /// Number of lines that are not blank
    pub fn filled_line_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_blank()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_batch_has_one_blank_line() {
        let batch = Batch::new("Test");
        assert_eq!(batch.name, "Test");
        assert_eq!(batch.lines.len(), 1);
        assert_eq!(batch.filled_line_count(), 0);
    }

    #[test]
    fn test_duplicate_keeps_lines_and_changes_identity() {
        let mut batch = Batch::new("Weekly");
        batch.lines[0].upc = "0001234567890".to_string();
        let copy = batch.duplicate_as("Weekly_COPY");
        assert_ne!(copy.id, batch.id);
        assert_eq!(copy.name, "Weekly_COPY");
        assert_eq!(copy.lines, batch.lines);
    }

    #[test]
    fn test_deserialize_stored_batch() {
        let batch: Batch = serde_json::from_value(json!({
            "id": "lq2x9k1abc",
            "name": "Legacy",
            "lines": [{"recordType": "REG", "upc": "0001234567890", "promoQty": 2}],
            "updatedAt": "2025-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(batch.id.as_str(), "lq2x9k1abc");
        assert_eq!(batch.lines[0].promo_qty, "2");
        assert_eq!(batch.updated_at.to_rfc3339(), "2025-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_touch_advances_timestamp() {
        let mut batch = Batch::new("T");
        let before = batch.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        batch.touch();
        assert!(batch.updated_at > before);
    }
}
