//! Bulk edit commands: `add-upcs`, `apply`, `remove-line`, `refresh`
//!
//! Edits are saved through the write-behind saver, which is flushed before
//! the command returns.

use crate::cli::context::{report_error, AppContext};
use crate::core::bulk::{self, BulkFields};
use crate::domain::{Batch, RecordType};
use clap::Args;

/// Arguments for the add-upcs command
#[derive(Args, Debug)]
pub struct AddUpcsArgs {
    /// Batch id or name
    pub batch: String,

    /// UPCs; each argument may hold several separated by commas or spaces
    #[arg(required = true)]
    pub upcs: Vec<String>,

    /// Record type for the new lines
    #[arg(short, long, default_value = "SALE")]
    pub record_type: RecordType,
}

impl AddUpcsArgs {
    /// Execute the add-upcs command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let mut batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        let tokens = bulk::parse_upc_tokens(&self.upcs.join(" "));
        let catalog = ctx.catalog();
        let outcome = bulk::add_upcs(&mut batch, &tokens, self.record_type, catalog.as_deref());

        println!("➕ {} added, {} replaced", outcome.added, outcome.replaced);
        if catalog.is_some() {
            println!(
                "   {} of {} found in catalog",
                outcome.matched,
                outcome.added + outcome.replaced
            );
        }
        if outcome.skipped > 0 {
            println!("⚠️  {} token(s) without digits skipped", outcome.skipped);
        }

        save(&ctx, batch).await
    }
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Batch id or name
    pub batch: String,

    /// Record type for every line
    #[arg(long)]
    pub record_type: Option<RecordType>,

    /// Promo price for every line
    #[arg(long)]
    pub promo_price: Option<String>,

    /// Promo quantity for every line
    #[arg(long)]
    pub promo_qty: Option<String>,

    /// Start date (YYYY-MM-DD) for every line
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date (YYYY-MM-DD) for every line
    #[arg(long)]
    pub end_date: Option<String>,
}

impl ApplyArgs {
    fn fields(&self) -> BulkFields {
        BulkFields {
            record_type: self.record_type,
            promo_price: self.promo_price.clone(),
            promo_qty: self.promo_qty.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    /// Execute the apply command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let fields = self.fields();
        if fields.is_empty() {
            println!("⚠️  Nothing to apply; pass at least one field option");
            return Ok(2);
        }

        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let mut batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        let changed = bulk::apply_to_all(&mut batch, &fields);
        println!("✏️  Updated {} of {} line(s)", changed, batch.lines.len());
        if changed == 0 {
            return Ok(0);
        }
        save(&ctx, batch).await
    }
}

/// Arguments for the remove-line command
#[derive(Args, Debug)]
pub struct RemoveLineArgs {
    /// Batch id or name
    pub batch: String,

    /// Line number, 1-based as in validation messages
    pub line: usize,
}

impl RemoveLineArgs {
    /// Execute the remove-line command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let mut batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        match bulk::remove_line(&mut batch, self.line) {
            Ok(removed) => {
                let label = if removed.upc.is_empty() {
                    "blank line".to_string()
                } else {
                    format!("UPC {}", removed.upc)
                };
                println!("➖ Removed line {} ({label})", self.line);
                save(&ctx, batch).await
            }
            Err(e) => Ok(report_error("Failed to remove line", &e)),
        }
    }
}

/// Arguments for the refresh command
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Batch id or name
    pub batch: String,
}

impl RefreshArgs {
    /// Execute the refresh command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let Some(catalog) = ctx.catalog() else {
            println!("❌ No catalog loaded; nothing to refresh from");
            return Ok(3);
        };
        let mut batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        let refreshed = bulk::refresh_from_catalog(&mut batch, &catalog);
        println!(
            "🔄 Refreshed {} of {} line(s) from catalog",
            refreshed,
            batch.lines.len()
        );
        if refreshed == 0 {
            return Ok(0);
        }
        save(&ctx, batch).await
    }
}

async fn save(ctx: &AppContext, batch: Batch) -> anyhow::Result<i32> {
    let saver = ctx.saver();
    if let Err(e) = saver.schedule(batch) {
        return Ok(report_error("Failed to save batch", &e));
    }
    match saver.shutdown().await {
        Ok(report) if report.is_clean() => {
            println!("💾 Saved");
            Ok(0)
        }
        Ok(_) => {
            println!("❌ Batch was not saved (see log for details)");
            Ok(3)
        }
        Err(e) => Ok(report_error("Failed to save batch", &e)),
    }
}
