//! Core business logic for PriceBatch.
//!
//! Everything here is synchronous and works on explicit inputs: a batch and,
//! optionally, a catalog snapshot. Nothing reads global state.
//!
//! # Modules
//!
//! - [`upc`] - UPC canonicalization
//! - [`catalog`] - Catalog snapshots, lookup and search
//! - [`validation`] - Line and batch validation
//! - [`export`] - All-or-nothing CSV export
//! - [`bulk`] - Bulk batch edits
//!
//! # Example
//!
//! ```rust
//! use pricebatch::core::{bulk, export, validation};
//! use pricebatch::domain::{Batch, RecordType};
//!
//! let mut batch = Batch::new("Weekly");
//! bulk::add_upcs(&mut batch, ["012345678905"], RecordType::Reg, None);
//!
//! assert!(validation::validate_batch(&batch, None).is_empty());
//! let csv = export::to_csv(&batch, None).unwrap();
//! assert!(csv.ends_with("REG,0001234567890,,1,,\r\n"));
//! ```

pub mod bulk;
pub mod catalog;
pub mod export;
pub mod upc;
pub mod validation;
