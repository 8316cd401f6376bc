use std::sync::Arc;

use tokio::task::JoinHandle;

use jb_core::ports::KeyValueStorePort;
use jb_core::storage_keys::NAVIGATION_STATE_KEY;

use crate::usecases::internal::BestEffortWriter;

/// Persists the navigation tree on every navigation change.
///
/// Writes are unconditional and fire-and-forget.
#[derive(Clone)]
pub struct NavigationStatePersister {
    writer: BestEffortWriter,
}

impl NavigationStatePersister {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            writer: BestEffortWriter::new(store),
        }
    }

    /// Queue a write of `serialized`. Dropping the handle is fine.
    pub fn persist(&self, serialized: impl Into<String>) -> JoinHandle<bool> {
        self.writer
            .spawn_write(NAVIGATION_STATE_KEY.to_string(), serialized.into())
    }

    pub fn failure_count(&self) -> usize {
        self.writer.failure_count()
    }
}
