//! Export command implementation
//!
//! This module implements the `export` command, which validates a batch and
//! writes it as a CSV file. Nothing is written while any line has an issue.

use crate::cli::context::{report_error, AppContext};
use crate::core::export::{export_batch_to, export_file_name, to_csv};
use crate::domain::{ExportRefusal, PriceBatchError};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Batch id or name
    pub batch: String,

    /// Override the configured output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write the CSV to standard output instead of a file
    #[arg(long, conflicts_with_all = ["output_dir", "dry_run"])]
    pub stdout: bool,

    /// Validate and show the target file without writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };
        let catalog = ctx.catalog();

        if self.stdout {
            return match to_csv(&batch, catalog.as_deref()) {
                Ok(text) => {
                    let mut out = std::io::stdout().lock();
                    out.write_all(text.as_bytes())?;
                    out.flush()?;
                    Ok(0)
                }
                Err(e) => Ok(report_failure(&e)),
            };
        }

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&ctx.config.export.output_dir));

        if self.dry_run {
            println!("🔍 DRY RUN MODE - No file will be written");
            println!();
            return match to_csv(&batch, catalog.as_deref()) {
                Ok(text) => {
                    let path =
                        output_dir.join(export_file_name(&batch.name, &ctx.config.export.file_suffix));
                    println!("✅ Batch '{}' is ready to export", batch.name);
                    println!("   Would write {} row(s), {} bytes", batch.lines.len(), text.len());
                    println!("   Target: {}", path.display());
                    Ok(0)
                }
                Err(e) => Ok(report_failure(&e)),
            };
        }

        println!("🚀 Exporting batch '{}'...", batch.name);
        match export_batch_to(
            &batch,
            catalog.as_deref(),
            &output_dir,
            &ctx.config.export.file_suffix,
        ) {
            Ok(summary) => {
                println!();
                print!("{}", summary.format_summary());
                println!();
                println!("✅ Export completed successfully!");
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}

/// Refusals list every issue; other errors go through the usual report
fn report_failure(err: &PriceBatchError) -> i32 {
    match err {
        PriceBatchError::Refused(refusal) => {
            print_refusal(refusal);
            1
        }
        other => report_error("Export failed", other),
    }
}

fn print_refusal(refusal: &ExportRefusal) {
    tracing::warn!(
        issue_count = refusal.issues.len(),
        "Export refused, batch has validation issues"
    );
    // stderr keeps --stdout output clean
    eprintln!("❌ Export refused: fix these issues first");
    for issue in &refusal.issues {
        eprintln!("   - {issue}");
    }
    let lines: Vec<String> = refusal
        .failed_lines()
        .iter()
        .map(usize::to_string)
        .collect();
    eprintln!("   Failed lines: {}", lines.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::TestEnv;
    use crate::domain::Line;
    use std::fs;

    fn sale_line() -> Line {
        Line {
            record_type: "SALE".to_string(),
            upc: "012345678905".to_string(),
            promo_price: "0.99".to_string(),
            promo_qty: "2".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-06-07".to_string(),
            ..Line::blank()
        }
    }

    fn args(batch: &str) -> ExportArgs {
        ExportArgs {
            batch: batch.to_string(),
            output_dir: None,
            stdout: false,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let env = TestEnv::with_catalog();
        let mut batch = env.create("Weekly Ad").await;
        batch.lines = vec![sale_line()];
        env.save(&batch).await;

        assert_eq!(args("weekly ad").execute(&env.config_path).await.unwrap(), 0);

        let written =
            fs::read_to_string(env.export_dir().join("Weekly_Ad_price_batch.csv")).unwrap();
        assert_eq!(
            written,
            "Record Type,UPC,Promo_Price,Promo_Qty,Start_Date,End_Date\r\n\
             SALE,0001234567890,0.99,2,2025-06-01,2025-06-07\r\n"
        );
    }

    #[tokio::test]
    async fn test_refused_export_writes_nothing() {
        let env = TestEnv::new();
        env.create("Weekly").await;

        assert_eq!(args("Weekly").execute(&env.config_path).await.unwrap(), 1);
        assert!(!env.export_dir().exists());
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let env = TestEnv::new();
        let mut batch = env.create("Weekly").await;
        batch.lines = vec![sale_line()];
        env.save(&batch).await;

        let mut dry = args("Weekly");
        dry.dry_run = true;
        assert_eq!(dry.execute(&env.config_path).await.unwrap(), 0);
        assert!(!env.export_dir().exists());
    }

    #[tokio::test]
    async fn test_output_dir_override() {
        let env = TestEnv::new();
        let mut batch = env.create("Weekly").await;
        batch.lines = vec![sale_line()];
        env.save(&batch).await;

        let target = env.dir.path().join("elsewhere");
        let mut custom = args("Weekly");
        custom.output_dir = Some(target.clone());
        assert_eq!(custom.execute(&env.config_path).await.unwrap(), 0);
        assert!(target.join("Weekly_price_batch.csv").exists());
    }
}
