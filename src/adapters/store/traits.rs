//! Batch store abstraction
//!
//! This module defines the trait that batch persistence backends implement.

use crate::domain::errors::StoreError;
use crate::domain::{Batch, BatchId, Result};
use async_trait::async_trait;

/// Persistence collaborator for batches
///
/// Implementations own name uniqueness: no two stored batches may have names
/// that are equal ignoring ASCII case.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// All batches, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn list(&self) -> Result<Vec<Batch>>;

    /// One batch by id, `None` if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn get(&self, id: &BatchId) -> Result<Option<Batch>>;

    /// Stores a new batch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] for a blank name and
    /// [`StoreError::DuplicateName`] if the name is taken.
    async fn insert(&self, batch: Batch) -> Result<Batch>;

    /// Creates or replaces a batch by id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if another batch has the name, or
    /// an error if the backend cannot be written.
    async fn upsert(&self, batch: &Batch) -> Result<()>;

    /// Deletes a batch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchNotFound`] if no batch has this id.
    async fn delete(&self, id: &BatchId) -> Result<()>;

    /// Creates an empty batch (one blank line) named `name`
    ///
    /// # Errors
    ///
    /// Same as [`BatchStore::insert`].
    async fn create(&self, name: &str) -> Result<Batch> {
        self.insert(Batch::new(name.trim())).await
    }

    /// Resolves a batch by id, or failing that by case-insensitive name
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchNotFound`] if neither matches.
    async fn find(&self, key: &str) -> Result<Batch> {
        let key = key.trim();
        if let Ok(id) = BatchId::new(key) {
            if let Some(batch) = self.get(&id).await? {
                return Ok(batch);
            }
        }

        self.list()
            .await?
            .into_iter()
            .find(|b| b.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| StoreError::BatchNotFound(key.to_string()).into())
    }

    /// Copies a batch under a fresh id and a `_COPY` name
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchNotFound`] if the source does not exist.
    async fn duplicate(&self, id: &BatchId) -> Result<Batch> {
        let source = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::BatchNotFound(id.to_string()))?;

        let names: Vec<String> = self.list().await?.into_iter().map(|b| b.name).collect();
        let name = duplicate_name(&names, &source.name);
        self.insert(source.duplicate_as(name)).await
    }
}

/// First unused copy name for `name`
///
/// Tries `<name>_COPY`, then `<name>_COPY_3`, `<name>_COPY_4`, and so on.
/// Comparison ignores ASCII case.
///
/// ```
/// use pricebatch::adapters::store::duplicate_name;
///
/// let existing = vec!["Weekly".to_string(), "weekly_copy".to_string()];
/// assert_eq!(duplicate_name(&existing, "Weekly"), "Weekly_COPY_3");
/// ```
pub fn duplicate_name<S: AsRef<str>>(existing: &[S], name: &str) -> String {
    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|n| n.as_ref().eq_ignore_ascii_case(candidate))
    };

    let base = format!("{name}_COPY");
    if !taken(&base) {
        return base;
    }
    let mut n = 3;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
