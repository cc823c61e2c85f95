//! Catalog lookup
//!
//! A [`Catalog`] maps canonical UPCs to [`CatalogItem`]s. It is built
//! wholesale from an external snapshot and never patched in place; a refresh
//! builds a new `Catalog` and swaps it into a [`CatalogStore`].
//!
//! "No catalog loaded" is modelled as `Option<&Catalog>::None` at every call
//! site, which is distinct from "loaded, UPC not found".

use crate::core::upc::{canonicalize, digits};
use crate::domain::catalog::{CatalogItem, CatalogRecord};
use crate::domain::errors::CatalogError;
use crate::domain::ids::CanonicalUpc;
use crate::domain::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Immutable catalog snapshot keyed by canonical UPC
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<CanonicalUpc, CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from snapshot records
    ///
    /// Records without UPC digits or with a negative price are skipped with a
    /// warning. When two records share a canonical UPC the later one wins.
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut items = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            match CatalogItem::from_record(record) {
                Ok(item) => {
                    if let Some(previous) = items.insert(item.upc.clone(), item) {
                        tracing::debug!(upc = %previous.upc, "Duplicate catalog UPC replaced");
                    }
                }
                Err(reason) => {
                    skipped += 1;
                    tracing::warn!(reason = %reason, "Skipping catalog record");
                }
            }
        }

        tracing::debug!(items = items.len(), skipped, "Catalog built");
        Self { items }
    }

    /// Looks up an item by canonical UPC
    pub fn lookup(&self, upc: &CanonicalUpc) -> Option<&CatalogItem> {
        self.items.get(upc)
    }

    /// Canonicalizes `raw` and looks it up
    pub fn lookup_raw(&self, raw: &str) -> Option<&CatalogItem> {
        self.lookup(&canonicalize(raw))
    }

    /// Whether the canonical UPC is a key of this snapshot
    pub fn contains(&self, upc: &CanonicalUpc) -> bool {
        self.items.contains_key(upc)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the snapshot has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items in canonical UPC order
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    /// Finds items matching a free-text term
    ///
    /// An all-digit term puts the exact canonical match first, then any
    /// item whose UPC contains the digits. Any term also matches brand or
    /// description case-insensitively. Results are unique and capped at
    /// `limit`.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&CatalogItem> {
        let term = term.trim().to_lowercase();
        if term.is_empty() || limit == 0 {
            return Vec::new();
        }

        let numeric = is_upc_term(&term);
        let mut hits: Vec<&CatalogItem> = Vec::new();

        let exact = if numeric {
            self.lookup(&canonicalize(&term))
        } else {
            None
        };
        if let Some(item) = exact {
            hits.push(item);
        }

        for item in self.items.values() {
            if hits.len() >= limit {
                break;
            }
            if exact.is_some_and(|e| e.upc == item.upc) {
                continue;
            }
            let upc_match = numeric && item.upc.as_str().contains(&term);
            if upc_match
                || item.brand.to_lowercase().contains(&term)
                || item.description.to_lowercase().contains(&term)
            {
                hits.push(item);
            }
        }

        hits.truncate(limit);
        hits
    }
}

/// Loads a catalog snapshot from a JSON file holding an array of records
///
/// # Errors
///
/// Returns [`CatalogError`] when the file is missing, unreadable, or not a
/// JSON array of records. Callers usually degrade to "no catalog" on error.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CatalogError::NotFound(path.display().to_string()).into());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::ReadFailed(format!("{}: {}", path.display(), e)))?;

    let records: Vec<CatalogRecord> = serde_json::from_str(&contents)
        .map_err(|e| CatalogError::ParseFailed(format!("{}: {}", path.display(), e)))?;

    let catalog = Catalog::from_records(records);
    tracing::info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Holder for the current catalog generation
///
/// Readers take an `Arc` snapshot and keep a consistent view for as long as
/// they hold it; a refresh swaps the whole generation at once.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogStore {
    /// Creates a store with no catalog loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation, or `None` while unavailable
    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the whole catalog
    pub fn replace(&self, catalog: Catalog) {
        let next = Some(Arc::new(catalog));
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Drops the current catalog (load failed or not yet loaded)
    pub fn mark_unavailable(&self) {
        match self.current.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Loads `path` and swaps it in; on failure the store becomes unavailable
    ///
    /// # Errors
    ///
    /// Returns the load error after marking the store unavailable.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<usize> {
        match load_catalog(path) {
            Ok(catalog) => {
                let len = catalog.len();
                self.replace(catalog);
                Ok(len)
            }
            Err(e) => {
                self.mark_unavailable();
                Err(e)
            }
        }
    }
}

/// True when `term` would be treated as a UPC fragment by [`Catalog::search`]
pub fn is_upc_term(term: &str) -> bool {
    let trimmed = term.trim();
    !trimmed.is_empty() && digits(trimmed).len() == trimmed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBatchError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(upc: &str, brand: &str, description: &str, price: f64) -> CatalogRecord {
        CatalogRecord {
            upc: upc.to_string(),
            brand: brand.to_string(),
            description: description.to_string(),
            reg_price: Some(price),
        }
    }

    fn sample() -> Catalog {
        Catalog::from_records(vec![
            record("012345678905", "Acme", "Rocket Skates", 19.99),
            record("4006381333931", "Stabilo", "Highlighter Yellow", 1.29),
            record("0001234567899", "Acme", "Anvil", 49.0),
        ])
    }

    #[test]
    fn test_lookup_by_canonical_upc() {
        let catalog = sample();
        let item = catalog.lookup_raw("0-12345-67890-5").unwrap();
        assert_eq!(item.description, "Rocket Skates");
        assert!(catalog.contains(&canonicalize("4006381333931")));
        assert!(catalog.lookup_raw("999").is_none());
    }

    #[test]
    fn test_later_duplicate_wins_and_bad_records_skipped() {
        let catalog = Catalog::from_records(vec![
            record("0001234567890", "Old", "Old", 1.0),
            record("012345678905", "New", "New", 2.0),
            record("", "None", "None", 1.0),
            record("1234", "Neg", "Neg", -3.0),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup_raw("0001234567890").unwrap().brand, "New");
    }

    #[test]
    fn test_search_exact_upc_first() {
        let catalog = sample();
        let hits = catalog.search("012345678905", 50);
        assert_eq!(hits[0].description, "Rocket Skates");
    }

    #[test]
    fn test_search_digit_fragment_and_text() {
        let catalog = sample();
        let hits = catalog.search("1234567", 50);
        assert_eq!(hits.len(), 2);

        let hits = catalog.search("acme", 50);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|i| i.brand == "Acme"));

        let hits = catalog.search("HIGHLIGHT", 50);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_respects_limit_and_blank() {
        let catalog = sample();
        assert_eq!(catalog.search("acme", 1).len(), 1);
        assert!(catalog.search("   ", 10).is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"upc":"012345678905","brand":"Acme","description":"Skates","reg_price":19.99}},
               {{"upc":"4006381333931","brand":"Stabilo","description":"Pen","reg_price":"1.29"}}]"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_catalog_errors() {
        let missing = load_catalog("does/not/exist.json");
        assert!(matches!(
            missing,
            Err(PriceBatchError::Catalog(CatalogError::NotFound(_)))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        assert!(matches!(
            load_catalog(file.path()),
            Err(PriceBatchError::Catalog(CatalogError::ParseFailed(_)))
        ));
    }

    #[test]
    fn test_catalog_store_swaps_generations() {
        let store = CatalogStore::new();
        assert!(store.snapshot().is_none());

        store.replace(sample());
        let old = store.snapshot().unwrap();
        assert_eq!(old.len(), 3);

        store.replace(Catalog::default());
        assert_eq!(old.len(), 3);
        assert_eq!(store.snapshot().unwrap().len(), 0);

        store.mark_unavailable();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_reload_failure_marks_unavailable() {
        let store = CatalogStore::new();
        store.replace(sample());
        assert!(store.reload_from("missing.json").is_err());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_is_upc_term() {
        assert!(is_upc_term("0123"));
        assert!(!is_upc_term("acme"));
        assert!(!is_upc_term(""));
    }
}
