//! Catalog snapshot records
//!
//! [`CatalogRecord`] is one entry as it arrives from the external master-item
//! snapshot; [`CatalogItem`] is the validated, canonical-keyed form held by
//! [`Catalog`](crate::core::catalog::Catalog).

use crate::core::upc::canonicalize;
use crate::domain::ids::CanonicalUpc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw snapshot entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
    /// UPC as published upstream (UPC-A or EAN-13, any punctuation)
    #[serde(default)]
    pub upc: String,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub description: String,

    #[serde(
        default,
        alias = "reference_price",
        alias = "referencePrice",
        deserialize_with = "deserialize_price"
    )]
    pub reg_price: Option<f64>,
}

/// Immutable catalog entry keyed by canonical UPC
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub upc: CanonicalUpc,
    pub brand: String,
    pub description: String,
    /// Reference (regular) price, never negative
    pub reference_price: f64,
}

impl CatalogItem {
    /// Builds an item from a snapshot record
    ///
    /// # Returns
    ///
    /// `Err` with a reason when the UPC has no digits or the price is
    /// negative or not finite. A missing price becomes 0.
    pub fn from_record(record: CatalogRecord) -> Result<Self, String> {
        let upc = canonicalize(&record.upc);
        if upc.is_empty() {
            return Err(format!("record has no UPC digits: '{}'", record.upc));
        }

        let reference_price = record.reg_price.unwrap_or(0.0);
        if !reference_price.is_finite() || reference_price < 0.0 {
            return Err(format!(
                "invalid reference price {reference_price} for UPC {upc}"
            ));
        }

        Ok(Self {
            upc,
            brand: record.brand.trim().to_string(),
            description: record.description.trim().to_string(),
            reference_price,
        })
    }

    /// Reference price as stored on a line, two decimals
    pub fn reference_price_text(&self) -> String {
        format!("{:.2}", self.reference_price)
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("price out of range")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("price is not a number: '{s}'"))),
        Some(other) => Err(de::Error::custom(format!(
            "price must be a number, got {other}"
        ))),
    }
}
