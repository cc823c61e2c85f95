//! Shared setup for commands that touch batches or the catalog

use crate::adapters::store::{create_batch_store, BatchStore, WriteBehind};
use crate::config::{load_config, AppConfig};
use crate::core::catalog::{Catalog, CatalogStore};
use crate::domain::{PriceBatchError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Loaded configuration, batch store and catalog snapshot
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn BatchStore>,
    catalogs: CatalogStore,
}

impl AppContext {
    /// Loads the config, opens the batch store and tries to load the catalog
    ///
    /// A catalog that fails to load is reported and left unavailable,
    /// unless `catalog.required` is set.
    ///
    /// # Errors
    ///
    /// Returns configuration or store errors, and catalog errors when the
    /// catalog is required.
    pub async fn open(config_path: &str) -> Result<Self> {
        let config = load_config(config_path)?;
        let store = create_batch_store(&config.storage).await?;

        let catalogs = CatalogStore::new();
        if let Err(e) = catalogs.reload_from(&config.catalog.path) {
            if config.catalog.required {
                return Err(e);
            }
            tracing::warn!(error = %e, "Catalog unavailable, UPC membership will not be checked");
            eprintln!("⚠️  Catalog unavailable ({e}); UPC membership is not checked");
        }

        Ok(Self {
            config,
            store,
            catalogs,
        })
    }

    /// Current catalog snapshot, if one is loaded
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalogs.snapshot()
    }

    /// Starts a write-behind saver using the configured debounce
    pub fn saver(&self) -> WriteBehind {
        WriteBehind::spawn(
            self.store.clone(),
            Duration::from_millis(self.config.storage.autosave_debounce_ms),
        )
    }
}

/// Exit code for an error
///
/// 1 validation problems, 2 configuration, 3 store or catalog, 5 anything else.
pub fn exit_code_for(err: &PriceBatchError) -> i32 {
    match err {
        PriceBatchError::Refused(_) | PriceBatchError::Validation(_) => 1,
        PriceBatchError::Configuration(_) => 2,
        PriceBatchError::Storage(_) | PriceBatchError::Catalog(_) => 3,
        _ => 5,
    }
}

/// Prints a failure line to stderr and returns its exit code
///
/// Diagnostics never go to stdout, which `export --stdout` reserves for CSV.
pub fn report_error(what: &str, err: &PriceBatchError) -> i32 {
    crate::log_error_with_context!(err, what);
    eprintln!("❌ {what}");
    eprintln!("   Error: {err}");
    exit_code_for(err)
}
