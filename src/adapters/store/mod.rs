//! Batch persistence
//!
//! - [`traits`] - The [`BatchStore`] trait and copy naming
//! - [`json_file`] - Single-file JSON implementation
//! - [`write_behind`] - Debounced background saver

pub mod json_file;
pub mod traits;
pub mod write_behind;

pub use json_file::JsonFileStore;
pub use traits::{duplicate_name, BatchStore};
pub use write_behind::{FlushReport, WriteBehind};

use crate::config::StorageConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the batch store described by the configuration
///
/// # Errors
///
/// Returns an error if the backing file cannot be created or is corrupt
pub async fn create_batch_store(config: &StorageConfig) -> Result<Arc<dyn BatchStore>> {
    tracing::debug!(path = %config.batches_path, "Opening JSON batch store");
    let store = JsonFileStore::open(&config.batches_path).await?;
    Ok(Arc::new(store))
}
