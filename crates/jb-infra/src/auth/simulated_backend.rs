use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use jb_core::ports::AuthBackendPort;
use jb_core::user::UserProfile;

/// Stand-in for the remote login call: waits one round trip and succeeds
/// unless told to fail.
pub struct SimulatedAuthBackend {
    round_trip: Duration,
    fail: AtomicBool,
}

impl SimulatedAuthBackend {
    pub fn new(round_trip: Duration) -> Self {
        Self {
            round_trip,
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl AuthBackendPort for SimulatedAuthBackend {
    async fn authenticate(&self, user: &UserProfile) -> Result<()> {
        debug!(user_id = %user.id, round_trip_ms = self.round_trip.as_millis() as u64, "simulated round trip");
        tokio::time::sleep(self.round_trip).await;
        if self.fail.load(Ordering::Relaxed) {
            anyhow::bail!("simulated backend rejected login for {}", user.id);
        }
        Ok(())
    }
}
