//! Persisted system logging.
//!
//! Log rows ride through the same local store as the form tables, with
//! one difference in error policy: a failed log write must never abort
//! the business operation that triggered it. Failures are reported to
//! the tracing output and discarded.

use std::sync::Arc;

use serde_json::Value;

use crate::adapters::SqliteStore;

/// Rows kept by [`SystemLogRecorder::prune`].
pub const LOG_RETENTION_ROWS: i64 = 1000;

/// Writes log entries to the local store, swallowing write failures.
#[derive(Clone)]
pub struct SystemLogRecorder {
    store: Arc<SqliteStore>,
}

impl SystemLogRecorder {
    /// Create a recorder over the local store.
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// Persist one log entry with an optional structured payload.
    pub async fn record(&self, level: &str, message: &str, data: Option<&Value>) {
        if let Err(err) = self.store.record_log(level, message, data).await {
            tracing::error!(%err, level, message, "failed to persist system log entry");
        }
    }

    /// Drop log entries beyond the most recent [`LOG_RETENTION_ROWS`].
    pub async fn prune(&self) {
        match self.store.prune_logs(LOG_RETENTION_ROWS).await {
            Ok(0) => {}
            Ok(deleted) => tracing::info!(deleted, "pruned old system log entries"),
            Err(err) => tracing::error!(%err, "system log pruning failed"),
        }
    }
}
