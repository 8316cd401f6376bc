//! Best-effort persistence.
//!
//! Navigation snapshots, launch markers and rollback removals must never
//! block or fail the UI. All of them go through [`BestEffortWriter`], which
//! swallows storage errors and keeps a record of them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use jb_core::ports::KeyValueStorePort;

#[derive(Default)]
struct FailureLog {
    count: AtomicUsize,
    last: Mutex<Option<String>>,
}

#[derive(Clone)]
pub struct BestEffortWriter {
    store: Arc<dyn KeyValueStorePort>,
    failures: Arc<FailureLog>,
}

impl BestEffortWriter {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            store,
            failures: Arc::new(FailureLog::default()),
        }
    }

    /// Returns whether the write landed.
    pub async fn write(&self, key: &str, value: &str) -> bool {
        match self.store.set(key, value).await {
            Ok(()) => {
                debug!(key, "best-effort write ok");
                true
            }
            Err(err) => {
                self.record(format!("write `{key}` failed: {err:#}")).await;
                false
            }
        }
    }

    /// Returns whether the removal landed.
    pub async fn remove(&self, keys: &[&str]) -> bool {
        match self.store.remove(keys).await {
            Ok(()) => true,
            Err(err) => {
                self.record(format!("remove {keys:?} failed: {err:#}")).await;
                false
            }
        }
    }

    /// Fire-and-forget write. The handle may be dropped.
    pub fn spawn_write(&self, key: String, value: String) -> JoinHandle<bool> {
        let writer = self.clone();
        tokio::spawn(async move { writer.write(&key, &value).await })
    }

    pub fn failure_count(&self) -> usize {
        self.failures.count.load(Ordering::Relaxed)
    }

    pub async fn last_failure(&self) -> Option<String> {
        self.failures.last.lock().await.clone()
    }

    async fn record(&self, reason: String) {
        warn!(reason = %reason, "best-effort storage operation failed");
        self.failures.count.fetch_add(1, Ordering::Relaxed);
        *self.failures.last.lock().await = Some(reason);
    }
}
