//! Checksums for exported files

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use pricebatch::core::export::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"Record Type,UPC\r\n");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Re-reads a written file and compares its checksum
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read
pub fn verify_file(path: impl AsRef<Path>, expected: &str) -> Result<bool> {
    let bytes = std::fs::read(path)?;
    Ok(calculate_checksum_bytes(&bytes) == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            calculate_checksum_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_different_content_different_checksum() {
        assert_ne!(
            calculate_checksum_bytes(b"REG,0001234567890,,1,,\r\n"),
            calculate_checksum_bytes(b"REG,0001234567890,,2,,\r\n")
        );
    }

    #[test]
    fn test_verify_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, b"hello").unwrap();

        let good = calculate_checksum_bytes(b"hello");
        assert!(verify_file(&path, &good).unwrap());
        assert!(!verify_file(&path, "00").unwrap());
        assert!(verify_file(dir.path().join("missing.csv"), &good).is_err());
    }
}
