//! Result type alias for PriceBatch
//!
//! This module provides a convenient Result type alias that uses
//! `PriceBatchError` as the error type.

use super::errors::PriceBatchError;

/// Result type alias for PriceBatch operations
///
/// # Examples
///
/// ```
/// use pricebatch::domain::result::Result;
/// use pricebatch::domain::errors::PriceBatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PriceBatchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PriceBatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_store_error_propagates() {
        fn inner() -> Result<()> {
            Err(StoreError::BatchNotFound("missing".to_string()))?;
            Ok(())
        }

        assert!(inner().is_err());
    }
}
