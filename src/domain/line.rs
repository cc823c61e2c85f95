//! Price-change line model
//!
//! A [`Line`] is one proposed price-change record inside a batch. Cells are
//! held as text exactly as entered so that invalid input survives a save and
//! reload; typed views ([`Line::record_type`], [`Line::promo_price_value`],
//! [`Line::effective_promo_qty`]) are computed on demand.

use crate::core::upc::canonicalize;
use crate::domain::catalog::CatalogItem;
use crate::domain::ids::CanonicalUpc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Promotional classification of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "SALE")]
    Sale,
    #[serde(rename = "TPR")]
    Tpr,
    #[serde(rename = "INSTORE")]
    InStore,
    /// Regular (non-promotional) reference price record
    #[serde(rename = "REG")]
    Reg,
}

impl RecordType {
    /// Every accepted record type
    pub const ALL: [RecordType; 4] = [
        RecordType::Sale,
        RecordType::Tpr,
        RecordType::InStore,
        RecordType::Reg,
    ];

    /// Parses an exact (case-sensitive) record type name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SALE" => Some(RecordType::Sale),
            "TPR" => Some(RecordType::Tpr),
            "INSTORE" => Some(RecordType::InStore),
            "REG" => Some(RecordType::Reg),
            _ => None,
        }
    }

    /// Export name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Sale => "SALE",
            RecordType::Tpr => "TPR",
            RecordType::InStore => "INSTORE",
            RecordType::Reg => "REG",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| {
            format!("Invalid record type '{s}'. Must be one of: SALE, TPR, INSTORE, REG")
        })
    }
}

/// One price-change line
///
/// `brand`, `description` and `reference_price` are denormalized copies of
/// the catalog entry and may go stale; the catalog stays authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub record_type: String,

    /// Raw UPC as entered (digits preferred, not canonical)
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub upc: String,

    #[serde(default, deserialize_with = "deserialize_cell")]
    pub brand: String,

    #[serde(default, deserialize_with = "deserialize_cell")]
    pub description: String,

    #[serde(default, alias = "regPrice", deserialize_with = "deserialize_cell")]
    pub reference_price: String,

    #[serde(default, deserialize_with = "deserialize_cell")]
    pub promo_price: String,

    #[serde(default, deserialize_with = "deserialize_cell")]
    pub promo_qty: String,

    /// ISO `YYYY-MM-DD` or empty
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub start_date: String,

    /// ISO `YYYY-MM-DD` or empty
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub end_date: String,
}

impl Line {
    /// A line with every cell empty
    pub fn blank() -> Self {
        Self::default()
    }

    /// True when the line has no UPC, brand or description yet
    pub fn is_blank(&self) -> bool {
        self.upc.trim().is_empty()
            && self.brand.trim().is_empty()
            && self.description.trim().is_empty()
    }

    /// Typed record type, if the trimmed cell is a known value
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::parse(self.record_type.trim())
    }

    /// Whether promo price and both dates are mandatory
    ///
    /// Any non-blank record type other than REG needs them, including
    /// unrecognised values.
    pub fn needs_promo(&self) -> bool {
        let rt = self.record_type.trim();
        !rt.is_empty() && rt != RecordType::Reg.as_str()
    }

    /// Canonical form of the stored UPC
    pub fn canonical_upc(&self) -> CanonicalUpc {
        canonicalize(&self.upc)
    }

    /// Promo price as a finite number, if the cell parses as one
    pub fn promo_price_value(&self) -> Option<f64> {
        let text = self.promo_price.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Parsed promo quantity when it is a positive integer
    pub fn promo_qty_value(&self) -> Option<u64> {
        parse_leading_int(&self.promo_qty).filter(|q| *q >= 1)
    }

    /// Quantity written to the export: the parsed quantity, or 1
    pub fn effective_promo_qty(&self) -> u64 {
        self.promo_qty_value().unwrap_or(1)
    }

    /// Copies brand, description and reference price from a catalog entry
    pub fn apply_catalog_item(&mut self, item: &CatalogItem) {
        self.brand = item.brand.clone();
        self.description = item.description.clone();
        self.reference_price = item.reference_price_text();
    }

    /// Clears the denormalized catalog fields
    pub fn clear_catalog_fields(&mut self) {
        self.brand.clear();
        self.description.clear();
        self.reference_price.clear();
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
///
/// Trailing text after the digits is ignored ("3.7" is 3, "2abc" is 2).
/// Negative values and inputs with no leading digits yield `None`.
/// Overflow saturates.
pub fn parse_leading_int(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Accepts a JSON string, number, boolean or null and stores it as text.
fn deserialize_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_record_type_parse_is_exact() {
        assert_eq!(RecordType::parse("SALE"), Some(RecordType::Sale));
        assert_eq!(RecordType::parse("INSTORE"), Some(RecordType::InStore));
        assert_eq!(RecordType::parse("sale"), None);
        assert_eq!(RecordType::parse(""), None);
        assert_eq!(" TPR ".parse::<RecordType>().unwrap(), RecordType::Tpr);
        assert!("BOGO".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_needs_promo() {
        let mut line = Line::blank();
        assert!(!line.needs_promo());
        line.record_type = "REG".to_string();
        assert!(!line.needs_promo());
        line.record_type = " SALE ".to_string();
        assert!(line.needs_promo());
        line.record_type = "BOGO".to_string();
        assert!(line.needs_promo());
    }

    #[test_case("", None ; "blank")]
    #[test_case("3", Some(3) ; "plain")]
    #[test_case("  12", Some(12) ; "leading whitespace")]
    #[test_case("3.7", Some(3) ; "decimal truncates")]
    #[test_case("2abc", Some(2) ; "trailing text")]
    #[test_case("+4", Some(4) ; "plus sign")]
    #[test_case("-2", None ; "negative")]
    #[test_case("-0", Some(0) ; "negative zero")]
    #[test_case("abc", None ; "no digits")]
    #[test_case("99999999999999999999999", Some(u64::MAX) ; "overflow saturates")]
    fn test_parse_leading_int(input: &str, expected: Option<u64>) {
        assert_eq!(parse_leading_int(input), expected);
    }

    #[test_case("", 1 ; "blank defaults")]
    #[test_case("0", 1 ; "zero defaults")]
    #[test_case("-5", 1 ; "negative defaults")]
    #[test_case("x", 1 ; "non numeric defaults")]
    #[test_case("6", 6 ; "positive kept")]
    fn test_effective_promo_qty(qty: &str, expected: u64) {
        let line = Line {
            promo_qty: qty.to_string(),
            ..Line::blank()
        };
        assert_eq!(line.effective_promo_qty(), expected);
    }

    #[test]
    fn test_promo_price_value() {
        let mut line = Line::blank();
        assert_eq!(line.promo_price_value(), None);
        line.promo_price = " 2.49 ".to_string();
        assert_eq!(line.promo_price_value(), Some(2.49));
        line.promo_price = "inf".to_string();
        assert_eq!(line.promo_price_value(), None);
        line.promo_price = "NaN".to_string();
        assert_eq!(line.promo_price_value(), None);
        line.promo_price = "abc".to_string();
        assert_eq!(line.promo_price_value(), None);
    }

    #[test]
    fn test_deserialize_mixed_cells() {
        let line: Line = serde_json::from_value(json!({
            "recordType": "SALE",
            "upc": "012345678905",
            "regPrice": 3.99,
            "promoPrice": 2.5,
            "promoQty": "",
            "startDate": "2025-01-01",
            "endDate": null
        }))
        .unwrap();

        assert_eq!(line.reference_price, "3.99");
        assert_eq!(line.promo_price, "2.5");
        assert_eq!(line.promo_qty, "");
        assert_eq!(line.end_date, "");
        assert_eq!(line.brand, "");
    }

    #[test]
    fn test_deserialize_rejects_nested_values() {
        let result: Result<Line, _> = serde_json::from_value(json!({ "upc": ["1"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let line = Line {
            record_type: "REG".to_string(),
            ..Line::blank()
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["recordType"], "REG");
        assert!(value.get("referencePrice").is_some());
    }

    #[test]
    fn test_is_blank() {
        let mut line = Line::blank();
        assert!(line.is_blank());
        line.promo_price = "1.00".to_string();
        assert!(line.is_blank());
        line.upc = "123".to_string();
        assert!(!line.is_blank());
    }
}
