//! Validate command implementation

use crate::cli::context::{report_error, AppContext};
use crate::core::validation::BatchReport;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Batch id or name
    pub batch: String,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Exits 0 when the batch is exportable and 1 when it has issues.
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
        let report = BatchReport::build(&batch, catalog.as_deref());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report.format_summary());
        }

        Ok(if report.is_exportable() { 0 } else { 1 })
    }
}
