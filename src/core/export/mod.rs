//! Batch export
//!
//! Export is all-or-nothing: a batch with any validation issue is refused
//! with the full issue list, and no file is written.

pub mod checksum;
pub mod summary;
pub mod writer;

pub use summary::ExportSummary;
pub use writer::{
    export_batch, export_batch_to, export_file_name, export_row, sanitize_file_name, to_csv,
    HEADER,
};
