//! Batch management commands: `new`, `list`, `duplicate`, `delete`

use crate::cli::context::{report_error, AppContext};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Batch name (unique, case-insensitive)
    pub name: String,
}

impl NewArgs {
    /// Execute the new command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };

        match ctx.store.create(&self.name).await {
            Ok(batch) => {
                println!("✅ Created batch '{}'", batch.name);
                println!("   ID: {}", batch.id);
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to create batch", &e)),
        }
    }
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show batches whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };

        let batches = match ctx.store.list().await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Failed to list batches", &e)),
        };

        let needle = self.filter.as_deref().map(str::to_lowercase);
        let shown: Vec<_> = batches
            .iter()
            .filter(|b| {
                needle
                    .as_deref()
                    .map_or(true, |n| b.name.to_lowercase().contains(n))
            })
            .collect();

        if shown.is_empty() {
            println!("📭 No batches found");
            return Ok(0);
        }

        println!("📋 Batches ({})", shown.len());
        println!();
        println!(
            "  {:<32} {:>6} {:>6}  {:<20} {}",
            "NAME", "LINES", "FILLED", "UPDATED", "ID"
        );
        for batch in shown {
            println!(
                "  {:<32} {:>6} {:>6}  {:<20} {}",
                batch.name,
                batch.lines.len(),
                batch.filled_line_count(),
                batch.updated_at.format("%Y-%m-%d %H:%M:%S"),
                batch.id
            );
        }
        Ok(0)
    }
}

/// Arguments for the duplicate command
#[derive(Args, Debug)]
pub struct DuplicateArgs {
    /// Batch id or name
    pub batch: String,
}

impl DuplicateArgs {
    /// Execute the duplicate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };

        let source = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        match ctx.store.duplicate(&source.id).await {
            Ok(copy) => {
                println!("✅ Duplicated '{}' as '{}'", source.name, copy.name);
                println!("   ID: {}", copy.id);
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to duplicate batch", &e)),
        }
    }
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Batch id or name
    pub batch: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(e) => return Ok(report_error("Failed to initialize", &e)),
        };

        let batch = match ctx.store.find(&self.batch).await {
            Ok(b) => b,
            Err(e) => return Ok(report_error("Batch not found", &e)),
        };

        if !self.yes && !confirm(&format!("Delete batch '{}'?", batch.name)).await? {
            println!("↩️  Cancelled");
            return Ok(0);
        }

        match ctx.store.delete(&batch.id).await {
            Ok(()) => {
                println!("🗑️  Deleted batch '{}'", batch.name);
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to delete batch", &e)),
        }
    }
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    println!("{question} [y/N]");
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::TestEnv;

    #[tokio::test]
    async fn test_new_list_duplicate_delete() {
        let env = TestEnv::new();

        let new = NewArgs {
            name: "Weekly".to_string(),
        };
        assert_eq!(new.execute(&env.config_path).await.unwrap(), 0);
        assert_eq!(new.execute(&env.config_path).await.unwrap(), 3);

        let dup = DuplicateArgs {
            batch: "weekly".to_string(),
        };
        assert_eq!(dup.execute(&env.config_path).await.unwrap(), 0);
        assert_eq!(env.batch_names().await, vec!["Weekly", "Weekly_COPY"]);

        let list = ListArgs {
            filter: Some("copy".to_string()),
        };
        assert_eq!(list.execute(&env.config_path).await.unwrap(), 0);

        let delete = DeleteArgs {
            batch: "Weekly_COPY".to_string(),
            yes: true,
        };
        assert_eq!(delete.execute(&env.config_path).await.unwrap(), 0);
        assert_eq!(env.batch_names().await, vec!["Weekly"]);
    }

    #[tokio::test]
    async fn test_unknown_batch_is_exit_3() {
        let env = TestEnv::new();
        let dup = DuplicateArgs {
            batch: "ghost".to_string(),
        };
        assert_eq!(dup.execute(&env.config_path).await.unwrap(), 3);
    }
}
