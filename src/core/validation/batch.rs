//! Batch validation and reporting

use crate::core::catalog::Catalog;
use crate::core::validation::line::validate_line;
use crate::domain::batch::Batch;
use crate::domain::issue::ValidationIssue;
use serde::Serialize;
use std::collections::BTreeSet;

/// Validates every line of `batch`
///
/// Each line is validated on a private copy, so the stored batch is never
/// normalized as a side effect. Issues come back in line order and, within a
/// line, in rule order. An empty result means the batch is exportable.
pub fn validate_batch(batch: &Batch, catalog: Option<&Catalog>) -> Vec<ValidationIssue> {
    batch
        .lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            let mut copy = line.clone();
            validate_line(&mut copy, index, catalog)
        })
        .collect()
}

/// Summary of a batch validation run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Batch name at validation time
    pub batch_name: String,

    /// Total number of lines
    pub line_count: usize,

    /// Whether a catalog took part in validation
    pub catalog_loaded: bool,

    /// All issues in line order
    pub issues: Vec<ValidationIssue>,
}

impl BatchReport {
    /// Validates `batch` and collects the result
    pub fn build(batch: &Batch, catalog: Option<&Catalog>) -> Self {
        let issues = validate_batch(batch, catalog);
        crate::log_validation_complete!(&batch.name, batch.lines.len(), issues.len());
        Self {
            batch_name: batch.name.clone(),
            line_count: batch.lines.len(),
            catalog_loaded: catalog.is_some(),
            issues,
        }
    }

    /// True when the batch has no issues
    pub fn is_exportable(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct lines with at least one issue
    pub fn invalid_line_count(&self) -> usize {
        self.issues
            .iter()
            .map(|i| i.line_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("📋 Validation Report: {}\n", self.batch_name));
        summary.push_str(&format!("  Lines: {}\n", self.line_count));
        summary.push_str(&format!(
            "  Catalog: {}\n",
            if self.catalog_loaded {
                "loaded"
            } else {
                "not loaded (membership not checked)"
            }
        ));

        if self.is_exportable() {
            summary.push_str("  ✅ No issues, ready to export\n");
            return summary;
        }

        summary.push_str(&format!(
            "  ❌ {} issue(s) on {} line(s)\n",
            self.issues.len(),
            self.invalid_line_count()
        ));
        for issue in &self.issues {
            summary.push_str(&format!("    - {}\n", issue.message));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogRecord;
    use crate::domain::issue::IssueCode;
    use crate::domain::line::Line;

    fn line(record_type: &str, upc: &str) -> Line {
        Line {
            record_type: record_type.to_string(),
            upc: upc.to_string(),
            ..Line::blank()
        }
    }

    #[test]
    fn test_issues_in_line_order() {
        let batch = Batch::with_lines(
            "Mixed",
            vec![
                line("REG", "012345678905"),
                line("SALE", "012345678905"),
                line("", ""),
            ],
        );

        let issues = validate_batch(&batch, None);
        let indices: Vec<usize> = issues.iter().map(|i| i.line_index).collect();
        assert_eq!(indices, vec![1, 1, 1, 2, 2]);
        assert_eq!(issues[3].code, IssueCode::RecordTypeInvalid);
        assert_eq!(issues[4].code, IssueCode::UpcInvalid);
    }

    #[test]
    fn test_validation_does_not_mutate_batch() {
        let batch = Batch::with_lines("B", vec![line("REG", "012345678905")]);
        let before = batch.clone();
        assert!(validate_batch(&batch, None).is_empty());
        assert_eq!(batch, before);
        assert_eq!(batch.lines[0].promo_qty, "");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let batch = Batch::with_lines(
            "B",
            vec![line("SALE", "123"), line("TPR", ""), line("REG", "x")],
        );
        assert_eq!(validate_batch(&batch, None), validate_batch(&batch, None));
    }

    #[test]
    fn test_report_counts_and_summary() {
        let catalog = Catalog::from_records(vec![CatalogRecord {
            upc: "012345678905".to_string(),
            brand: "Acme".to_string(),
            description: "Skates".to_string(),
            reg_price: Some(19.99),
        }]);
        let batch = Batch::with_lines(
            "Weekly",
            vec![
                line("REG", "012345678905"),
                line("REG", "4006381333931"),
                line("SALE", "4006381333931"),
            ],
        );

        let report = BatchReport::build(&batch, Some(&catalog));
        assert!(!report.is_exportable());
        assert_eq!(report.invalid_line_count(), 2);
        assert!(report.catalog_loaded);

        let text = report.format_summary();
        assert!(text.contains("Line 2: UPC not in master list"));
        assert!(text.contains("Line 3: Promo_Price required"));
    }

    #[test]
    fn test_clean_report() {
        let batch = Batch::with_lines("Clean", vec![line("INSTORE", "4006381333931")]);
        let mut batch = batch;
        batch.lines[0].promo_price = "1.00".to_string();
        batch.lines[0].start_date = "2025-01-01".to_string();
        batch.lines[0].end_date = "2025-01-31".to_string();

        let report = BatchReport::build(&batch, None);
        assert!(report.is_exportable());
        assert_eq!(report.invalid_line_count(), 0);
        assert!(report.format_summary().contains("ready to export"));
    }
}
