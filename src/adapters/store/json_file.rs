//! JSON file batch store
//!
//! All batches live in one pretty-printed JSON array. Every operation reads
//! the file, and every mutation rewrites it through a temporary file and a
//! rename, under a process-local lock.

use crate::adapters::store::traits::BatchStore;
use crate::domain::errors::StoreError;
use crate::domain::{Batch, BatchId, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Batch store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store, creating the file as `[]` (and its parent
    /// directories) when missing
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`] if the file cannot be created and
    /// [`StoreError::Corrupt`] if an existing file is not a batch array.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&store.path).await.unwrap_or(false) {
            store.write_all(&[]).await?;
            tracing::info!(path = %store.path.display(), "Created batch store");
        }

        let count = store.read_all().await?.len();
        tracing::debug!(path = %store.path.display(), batches = count, "Batch store opened");
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Batch>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::ReadFailed(format!("{}: {}", self.path.display(), e)))?;

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let batches = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))?;
        Ok(batches)
    }

    async fn write_all(&self, batches: &[Batch]) -> Result<()> {
        let write_failed =
            |e: std::io::Error| StoreError::WriteFailed(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let json = serde_json::to_string_pretty(batches)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(write_failed)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(write_failed)?;
        Ok(())
    }
}

fn name_taken(batches: &[Batch], name: &str, except: Option<&BatchId>) -> bool {
    batches
        .iter()
        .filter(|b| Some(&b.id) != except)
        .any(|b| b.name.eq_ignore_ascii_case(name))
}

#[async_trait]
impl BatchStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Batch>> {
        let _guard = self.lock.lock().await;
        let mut batches = self.read_all().await?;
        batches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(batches)
    }

    async fn get(&self, id: &BatchId) -> Result<Option<Batch>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_iter().find(|b| &b.id == id))
    }

    async fn insert(&self, mut batch: Batch) -> Result<Batch> {
        let name = batch.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidName("name cannot be empty".to_string()).into());
        }

        let _guard = self.lock.lock().await;
        let mut batches = self.read_all().await?;
        if name_taken(&batches, &name, None) {
            return Err(StoreError::DuplicateName(name).into());
        }
        if batches.iter().any(|b| b.id == batch.id) {
            batch.id = BatchId::generate();
        }

        batch.name = name;
        batches.push(batch.clone());
        self.write_all(&batches).await?;

        tracing::info!(batch_id = %batch.id, name = %batch.name, "Batch created");
        Ok(batch)
    }

    async fn upsert(&self, batch: &Batch) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut batches = self.read_all().await?;
        if name_taken(&batches, batch.name.trim(), Some(&batch.id)) {
            return Err(StoreError::DuplicateName(batch.name.clone()).into());
        }

        match batches.iter_mut().find(|b| b.id == batch.id) {
            Some(existing) => *existing = batch.clone(),
            None => batches.push(batch.clone()),
        }
        self.write_all(&batches).await?;

        tracing::debug!(batch_id = %batch.id, lines = batch.lines.len(), "Batch saved");
        Ok(())
    }

    async fn delete(&self, id: &BatchId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut batches = self.read_all().await?;
        let before = batches.len();
        batches.retain(|b| &b.id != id);
        if batches.len() == before {
            return Err(StoreError::BatchNotFound(id.to_string()).into());
        }
        self.write_all(&batches).await?;

        tracing::info!(batch_id = %id, "Batch deleted");
        Ok(())
    }
}
