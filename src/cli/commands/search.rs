//! Catalog search command

use crate::cli::context::{report_error, AppContext};
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// UPC digits, brand or description text
    pub term: String,

    /// Maximum number of results
    #[arg(short = 'n', long, default_value_t = 50)]
    pub limit: usize,
}

impl SearchArgs {
    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };
        let Some(catalog) = ctx.catalog() else {
            println!("❌ No catalog loaded; nothing to search");
            return Ok(3);
        };

        let hits = catalog.search(&self.term, self.limit);
        if hits.is_empty() {
            println!("🔍 No catalog items match '{}'", self.term.trim());
            return Ok(0);
        }

        println!("🔍 {} match(es) in {} catalog items", hits.len(), catalog.len());
        println!();
        println!("  {:<14} {:<20} {:<40} {:>9}", "UPC", "BRAND", "DESCRIPTION", "REG");
        for item in hits {
            println!(
                "  {:<14} {:<20} {:<40} {:>9}",
                item.upc.as_str(),
                item.brand,
                item.description,
                item.reference_price_text()
            );
        }
        Ok(0)
    }
}
