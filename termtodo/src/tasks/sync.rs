//! Write-through persistence of the task list.
//!
//! [`persist_to`] builds a controller subscriber that serializes every new
//! list and overwrites the persistence slot with it. Writes are
//! fire-and-forget:
//! 1. A failure is logged (never crashes the application).
//! 2. The mutation that triggered it still stands.
//! 3. The failure is recorded in [`SyncStatus`] so the UI can display
//!    "Could not save tasks".
//!
//! Nothing is retried; the next successful mutation rewrites the full list.

use std::sync::Arc;

use parking_lot::Mutex;
use termtodo_proto::{TaskList, codec};

use crate::store::KeyValueStore;

#[derive(Debug, Default)]
struct SyncState {
    writes: usize,
    failed_writes: usize,
    last_error: Option<String>,
}

/// Shared view of how persistence writes are going.
///
/// Cloning yields another handle on the same state.
#[derive(Debug, Clone, Default)]
pub struct SyncStatus {
    inner: Arc<Mutex<SyncState>>,
}

impl SyncStatus {
    /// Create a status with no writes recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    /// Number of failed writes.
    #[must_use]
    pub fn failed_writes(&self) -> usize {
        self.inner.lock().failed_writes
    }

    /// Error of the most recent write, cleared by the next successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    fn record_success(&self) {
        let mut state = self.inner.lock();
        state.writes += 1;
        state.last_error = None;
    }

    fn record_failure(&self, reason: String) {
        let mut state = self.inner.lock();
        state.failed_writes += 1;
        state.last_error = Some(reason);
    }
}

/// Serializes `list` and stores it under `key`.
fn write_list<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    list: &TaskList,
) -> Result<(), String> {
    let json = codec::encode(list).map_err(|e| e.to_string())?;
    store.save(key, &json).map_err(|e| e.to_string())
}

/// Builds a subscriber that mirrors every published list into `store`.
///
/// Register it with
/// [`TaskListController::subscribe`](super::TaskListController::subscribe).
pub fn persist_to<S>(
    store: S,
    key: impl Into<String>,
    status: SyncStatus,
) -> impl FnMut(&Arc<TaskList>) + 'static
where
    S: KeyValueStore + 'static,
{
    let key = key.into();
    move |list: &Arc<TaskList>| match write_list(&store, &key, list) {
        Ok(()) => {
            tracing::debug!(key = %key, tasks = list.len(), "task list persisted");
            status.record_success();
        }
        Err(reason) => {
            tracing::warn!(
                key = %key,
                error = %reason,
                "task list write failed; in-memory state kept"
            );
            status.record_failure(reason);
        }
    }
}
