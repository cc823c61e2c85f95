//! Domain identifier types
//!
//! This module provides newtype wrappers for the identifiers PriceBatch passes
//! around, so a raw UPC string can never be confused with a canonical key and
//! a batch id can never be confused with a batch name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canonical UPC key
///
/// The 13-character (or longer), zero-padded, check-digit-stripped form used
/// as the catalog lookup key and written to the export UPC column. An empty
/// value means the raw input held no digits.
///
/// Values are produced by [`canonicalize`](crate::core::upc::canonicalize);
/// there is no public constructor from arbitrary text.
///
/// # Examples
///
/// ```
/// use pricebatch::core::upc::canonicalize;
///
/// let upc = canonicalize("0-12345-67890-5");
/// assert_eq!(upc.as_str(), "0001234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalUpc(String);

impl CanonicalUpc {
    pub(crate) fn from_canonical(value: String) -> Self {
        Self(value)
    }

    /// Returns the canonical UPC as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the raw input held no digits at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalUpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalUpc {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Batch identifier newtype wrapper
///
/// New batches get a random UUID v4; ids read back from storage are kept
/// verbatim, since older stores used shorter opaque ids.
///
/// # Examples
///
/// ```
/// use pricebatch::domain::ids::BatchId;
/// use std::str::FromStr;
///
/// let id = BatchId::from_str("lq2x9k1abc").unwrap();
/// assert_eq!(id.as_str(), "lq2x9k1abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Generates a fresh random batch id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a BatchId from an existing identifier
    ///
    /// # Returns
    ///
    /// Returns `Ok(BatchId)` if the id is non-empty, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Batch ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the batch id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_generate_is_unique() {
        let a = BatchId::generate();
        let b = BatchId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_batch_id_empty_fails() {
        assert!(BatchId::new("").is_err());
        assert!(BatchId::new("   ").is_err());
    }

    #[test]
    fn test_batch_id_serialization_is_plain_string() {
        let id = BatchId::new("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: BatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_canonical_upc_display() {
        let upc = CanonicalUpc::from_canonical("0001234567890".to_string());
        assert_eq!(format!("{upc}"), "0001234567890");
        assert!(!upc.is_empty());
        assert!(CanonicalUpc::from_canonical(String::new()).is_empty());
    }
}
