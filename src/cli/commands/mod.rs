//! CLI command implementations
//!
//! Every command returns its process exit code; see
//! [`exit_code_for`](crate::cli::context::exit_code_for) for the mapping.

pub mod batch;
pub mod edit;
pub mod export;
pub mod init;
pub mod search;
pub mod validate;
pub mod validate_config;
