//! Debounced write-behind saver
//!
//! Edits are handed to [`WriteBehind::schedule`] and persisted later by a
//! background task. Repeated schedules of the same batch within the debounce
//! window collapse into one write of the latest state. Durability is
//! eventual: a failed write is logged and dropped, and only
//! [`WriteBehind::flush`] waits for pending writes. Each flush reports what
//! happened since the previous one, so callers can still tell whether their
//! edits reached the store.

use crate::adapters::store::traits::BatchStore;
use crate::domain::errors::PriceBatchError;
use crate::domain::{Batch, BatchId, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

enum Command {
    Schedule(Box<Batch>),
    Flush(oneshot::Sender<FlushReport>),
}

/// Writes since the previous flush, including the flush's own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub written: usize,
    pub failed: usize,
}

impl FlushReport {
    /// True when no write failed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Handle to the background saver
pub struct WriteBehind {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl WriteBehind {
    /// Starts the saver on the current tokio runtime
    ///
    /// A zero `debounce` writes each scheduled batch immediately.
    pub fn spawn(store: Arc<dyn BatchStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, debounce, rx));
        Self { tx, task }
    }

    /// Queues `batch` for saving, replacing any pending copy with the same id
    ///
    /// # Errors
    ///
    /// Returns an error if the background task has stopped.
    pub fn schedule(&self, batch: Batch) -> Result<()> {
        self.tx
            .send(Command::Schedule(Box::new(batch)))
            .map_err(|_| PriceBatchError::Other("write-behind saver has stopped".to_string()))
    }

    /// Writes everything pending now
    ///
    /// # Errors
    ///
    /// Returns an error if the background task has stopped.
    pub async fn flush(&self) -> Result<FlushReport> {
        let (reply, written) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .map_err(|_| PriceBatchError::Other("write-behind saver has stopped".to_string()))?;
        written
            .await
            .map_err(|_| PriceBatchError::Other("write-behind saver dropped a flush".to_string()))
    }

    /// Flushes and stops the background task
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush could not run.
    pub async fn shutdown(self) -> Result<FlushReport> {
        let report = self.flush().await?;
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Write-behind task ended abnormally");
        }
        Ok(report)
    }
}

async fn run(
    store: Arc<dyn BatchStore>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut pending: HashMap<BatchId, Batch> = HashMap::new();
    let mut deadline: Option<Instant> = None;
    let mut report = FlushReport::default();

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Schedule(batch)) => {
                    pending.insert(batch.id.clone(), *batch);
                    if debounce.is_zero() {
                        write_pending(store.as_ref(), &mut pending, &mut report).await;
                    } else {
                        deadline = Some(Instant::now() + debounce);
                    }
                }
                Some(Command::Flush(reply)) => {
                    write_pending(store.as_ref(), &mut pending, &mut report).await;
                    deadline = None;
                    let _ = reply.send(std::mem::take(&mut report));
                }
                None => {
                    write_pending(store.as_ref(), &mut pending, &mut report).await;
                    break;
                }
            },
            _ = wait_until(deadline) => {
                write_pending(store.as_ref(), &mut pending, &mut report).await;
                deadline = None;
            }
        }
    }

    tracing::debug!("Write-behind saver stopped");
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn write_pending(
    store: &dyn BatchStore,
    pending: &mut HashMap<BatchId, Batch>,
    report: &mut FlushReport,
) {
    let mut written = 0;
    for (id, batch) in pending.drain() {
        match store.upsert(&batch).await {
            Ok(()) => written += 1,
            Err(e) => {
                report.failed += 1;
                crate::log_error_with_context!(&e, format!("Autosave failed for batch {id}"));
            }
        }
    }
    if written > 0 {
        tracing::debug!(written, "Autosave complete");
    }
    report.written += written;
}
