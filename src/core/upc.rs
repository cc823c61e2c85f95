//! UPC canonicalization
//!
//! Upstream systems emit UPC-A (12 digits, trailing check digit) and EAN-13
//! inconsistently. Every comparison in PriceBatch goes through the canonical
//! key produced here: digits only, check digit dropped from 12-digit input,
//! left-padded with zeros to at least 13 characters.

use crate::domain::ids::CanonicalUpc;

/// Width of the canonical key
pub const CANONICAL_WIDTH: usize = 13;

/// Length of a UPC-A code including its check digit
const UPC_A_LEN: usize = 12;

/// Keeps only the ASCII digits of `raw`
pub fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalizes arbitrary UPC text into the canonical key
///
/// - no digits: empty key
/// - exactly 12 digits: drop the last (check) digit, pad the remaining 11
///   to 13
/// - any other length: pad to 13; longer input passes through unchanged
///
/// # Examples
///
/// ```
/// use pricebatch::core::upc::canonicalize;
///
/// assert_eq!(canonicalize("012345678905").as_str(), "0001234567890");
/// assert_eq!(canonicalize("4006381333931").as_str(), "4006381333931");
/// assert_eq!(canonicalize("12345").as_str(), "0000000012345");
/// assert!(canonicalize("n/a").is_empty());
/// ```
pub fn canonicalize(raw: &str) -> CanonicalUpc {
    let mut d = digits(raw);
    if d.is_empty() {
        return CanonicalUpc::from_canonical(d);
    }
    if d.len() == UPC_A_LEN {
        d.truncate(UPC_A_LEN - 1);
    }
    CanonicalUpc::from_canonical(format!("{d:0>width$}", width = CANONICAL_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "" ; "empty")]
    #[test_case("abc-/", "" ; "no digits")]
    #[test_case("012345678905", "0001234567890" ; "upc a drops check digit")]
    #[test_case("0 12345 67890 5", "0001234567890" ; "upc a with spaces")]
    #[test_case("4006381333931", "4006381333931" ; "ean 13 unchanged")]
    #[test_case("12345678901", "0012345678901" ; "eleven digits padded")]
    #[test_case("1", "0000000000001" ; "single digit")]
    #[test_case("12345678901234", "12345678901234" ; "fourteen digits pass through")]
    #[test_case("123456789012345", "123456789012345" ; "fifteen digits pass through")]
    fn test_canonicalize(raw: &str, expected: &str) {
        assert_eq!(canonicalize(raw).as_str(), expected);
    }

    #[test]
    fn test_twelve_digits_become_zero_plus_first_eleven() {
        for raw in ["012345678905", "999999999999", "100000000001"] {
            let canon = canonicalize(raw);
            assert_eq!(canon.as_str().len(), CANONICAL_WIDTH);
            assert_eq!(canon.as_str(), format!("00{}", &raw[..11]));
            assert!(canon.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_canonicalize_is_idempotent_on_canonical_output() {
        for raw in ["012345678905", "4006381333931", "42", "12345678901234"] {
            let once = canonicalize(raw);
            let twice = canonicalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_digits_strips_everything_else() {
        assert_eq!(digits("0-12 345/678x905"), "012345678905");
        assert_eq!(digits("١٢٣"), "");
    }
}
