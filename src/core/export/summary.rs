//! Export summary and reporting

use crate::domain::ids::BatchId;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a completed export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Exported batch
    pub batch_id: BatchId,

    /// Batch name at export time
    pub batch_name: String,

    /// Written file
    pub path: PathBuf,

    /// Number of data rows (header excluded)
    pub rows: usize,

    /// File size in bytes
    pub bytes: usize,

    /// SHA-256 of the file contents
    pub checksum: String,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Format the summary as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("📦 Export Summary: {}\n", self.batch_name));
        summary.push_str(&format!("  Batch ID: {}\n", self.batch_id));
        summary.push_str(&format!("  File: {}\n", self.path.display()));
        summary.push_str(&format!("  Rows: {}\n", self.rows));
        summary.push_str(&format!("  Bytes: {}\n", self.bytes));
        summary.push_str(&format!("  SHA-256: {}\n", self.checksum));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration.as_millis()));
        summary
    }
}
