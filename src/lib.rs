// PriceBatch - Retail price-change batch validation and export
// Copyright (c) 2025 PriceBatch Contributors
// Licensed under the MIT License

//! # PriceBatch - Retail price-change batch validation and export
//!
//! PriceBatch keeps named batches of proposed price changes (sale, TPR,
//! in-store and regular-price records keyed by UPC), checks them against a
//! master catalog snapshot, and exports a batch as a fixed six-column CSV
//! only when every line is valid.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - UPC canonicalization, catalog, validation, bulk edits, export
//! - [`adapters`] - Batch persistence (JSON file store, write-behind saver)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use pricebatch::core::catalog::Catalog;
//! use pricebatch::core::export::to_csv;
//! use pricebatch::core::validation::validate_batch;
//! use pricebatch::domain::{Batch, CatalogRecord, Line, PriceBatchError};
//!
//! let catalog = Catalog::from_records(vec![CatalogRecord {
//!     upc: "012345678905".to_string(),
//!     brand: "Acme".to_string(),
//!     description: "Cola 12oz".to_string(),
//!     reg_price: Some(1.49),
//! }]);
//!
//! let mut batch = Batch::new("Weekly ad");
//! batch.lines[0] = Line {
//!     record_type: "SALE".to_string(),
//!     upc: "012345678905".to_string(),
//!     ..Line::blank()
//! };
//!
//! // Promo price and dates are missing, so export is refused
//! assert_eq!(validate_batch(&batch, Some(&catalog)).len(), 3);
//! assert!(matches!(
//!     to_csv(&batch, Some(&catalog)),
//!     Err(PriceBatchError::Refused(_))
//! ));
//!
//! batch.lines[0].promo_price = "0.99".to_string();
//! batch.lines[0].start_date = "2025-06-01".to_string();
//! batch.lines[0].end_date = "2025-06-07".to_string();
//! let csv = to_csv(&batch, Some(&catalog)).unwrap();
//! assert!(csv.ends_with("SALE,0001234567890,0.99,1,2025-06-01,2025-06-07\r\n"));
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], with
//! [`domain::PriceBatchError`] as the error type. Line defects are data, not
//! errors: validation returns a list of [`domain::ValidationIssue`]s.
//!
//! ## Logging
//!
//! PriceBatch uses structured logging with the `tracing` crate; see
//! [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
