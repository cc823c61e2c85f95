//! CSV serialization of a batch
//!
//! Output is UTF-8 without BOM, CRLF after every row including the header.
//! A field is quoted only when it contains a comma, a double quote or a line
//! break; embedded quotes are doubled.

use crate::config::ExportConfig;
use crate::core::catalog::Catalog;
use crate::core::export::checksum::{calculate_checksum_bytes, verify_file};
use crate::core::export::summary::ExportSummary;
use crate::core::validation::validate_batch;
use crate::domain::errors::{ExportRefusal, PriceBatchError};
use crate::domain::{Batch, Line, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Export columns, in order
pub const HEADER: [&str; 6] = [
    "Record Type",
    "UPC",
    "Promo_Price",
    "Promo_Qty",
    "Start_Date",
    "End_Date",
];

/// Used when a batch name sanitizes to nothing
const FALLBACK_FILE_STEM: &str = "batch";

/// Serializes `batch` to CSV text
///
/// Validation runs first with the same `catalog` the caller would validate
/// with. If any line has an issue nothing is serialized and the error is
/// [`PriceBatchError::Refused`] carrying the full issue list. Identical batch
/// state always yields byte-identical text.
///
/// Passing `None` for `catalog` exports without the catalog-membership
/// check, so any well-formed UPC is accepted.
///
/// # Errors
///
/// Returns [`PriceBatchError::Refused`] on validation issues, or
/// [`PriceBatchError::Export`] if the CSV writer fails.
///
/// # Examples
///
/// ```
/// use pricebatch::core::export::to_csv;
/// use pricebatch::domain::{Batch, Line};
///
/// let line = Line {
///     record_type: "REG".to_string(),
///     upc: "0012345678905".to_string(),
///     ..Line::blank()
/// };
/// let batch = Batch::with_lines("Reg", vec![line]);
///
/// let csv = to_csv(&batch, None).unwrap();
/// assert_eq!(
///     csv,
///     "Record Type,UPC,Promo_Price,Promo_Qty,Start_Date,End_Date\r\n\
///      REG,0012345678905,,1,,\r\n"
/// );
/// ```
pub fn to_csv(batch: &Batch, catalog: Option<&Catalog>) -> Result<String> {
    let issues = validate_batch(batch, catalog);
    if !issues.is_empty() {
        tracing::warn!(
            batch_id = %batch.id,
            issue_count = issues.len(),
            "Export refused"
        );
        return Err(ExportRefusal::new(issues).into());
    }

    render(&batch.lines)
}

/// Cells of one export row
///
/// The UPC column carries the canonical key and Promo_Qty the defaulted
/// quantity, never blank or zero. Text cells are trimmed, matching what
/// validation looked at.
pub fn export_row(line: &Line) -> [String; 6] {
    [
        line.record_type.trim().to_string(),
        line.canonical_upc().into_inner(),
        line.promo_price.trim().to_string(),
        line.effective_promo_qty().to_string(),
        line.start_date.trim().to_string(),
        line.end_date.trim().to_string(),
    ]
}

fn render(lines: &[Line]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for line in lines {
        writer.write_record(&export_row(line))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PriceBatchError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| PriceBatchError::Export(format!("CSV output is not UTF-8: {e}")))
}

/// Replaces each run of characters outside `[A-Za-z0-9._-]` with `_`
///
/// ```
/// use pricebatch::core::export::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Week 23 / Dairy"), "Week_23_Dairy");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// File name for an exported batch: sanitized name plus `suffix`
pub fn export_file_name(batch_name: &str, suffix: &str) -> String {
    let stem = sanitize_file_name(batch_name.trim());
    let stem = if stem.is_empty() || stem == "_" {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    };
    format!("{stem}{suffix}")
}

/// Validates, serializes and writes `batch` into `config.output_dir`
///
/// The output directory is created if needed. The file is written to a
/// temporary name, renamed into place and its checksum verified, so a
/// partially written export never appears under the final name.
///
/// # Errors
///
/// Returns [`PriceBatchError::Refused`] when the batch has validation issues
/// (no file is touched), or an I/O or export error if writing fails.
pub fn export_batch(
    batch: &Batch,
    catalog: Option<&Catalog>,
    config: &ExportConfig,
) -> Result<ExportSummary> {
    export_batch_to(batch, catalog, Path::new(&config.output_dir), &config.file_suffix)
}

/// Like [`export_batch`] with an explicit directory and suffix
pub fn export_batch_to(
    batch: &Batch,
    catalog: Option<&Catalog>,
    output_dir: &Path,
    file_suffix: &str,
) -> Result<ExportSummary> {
    let start = Instant::now();
    let text = to_csv(batch, catalog)?;

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(export_file_name(&batch.name, file_suffix));
    let checksum = calculate_checksum_bytes(text.as_bytes());
    write_atomically(&path, text.as_bytes())?;

    if !verify_file(&path, &checksum)? {
        return Err(PriceBatchError::Export(format!(
            "Checksum mismatch after writing {}",
            path.display()
        )));
    }

    let summary = ExportSummary {
        batch_id: batch.id.clone(),
        batch_name: batch.name.clone(),
        path,
        rows: batch.lines.len(),
        bytes: text.len(),
        checksum,
        duration: start.elapsed(),
    };
    crate::log_export_complete!(&summary.batch_id, summary.rows, summary.duration);
    Ok(summary)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = PathBuf::from(path);
    tmp.as_mut_os_string().push(".tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
