use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "is the provider tree still mounted" flag.
///
/// State writes check it so that an operation finishing after a forced
/// logout cannot touch a torn-down session.
#[derive(Debug, Clone)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// One-way: a session is never re-mounted, a fresh one is built instead.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}
