//! External system integrations for PriceBatch.
//!
//! - [`store`] - Batch persistence behind the [`store::BatchStore`] trait
//!
//! # Design Pattern
//!
//! Adapters isolate I/O from the synchronous core. The core never loads or
//! saves anything; the CLI wires a store and a catalog snapshot around it.
//!
//! ```rust,no_run
//! use pricebatch::adapters::store::{create_batch_store, BatchStore, WriteBehind};
//! use pricebatch::config::StorageConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = create_batch_store(&StorageConfig::default()).await?;
//! let batch = store.create("Weekly ad").await?;
//!
//! let saver = WriteBehind::spawn(store.clone(), Duration::from_millis(500));
//! saver.schedule(batch)?;
//! saver.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod store;
