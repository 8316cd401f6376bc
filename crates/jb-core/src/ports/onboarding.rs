use anyhow::Result;
use async_trait::async_trait;

use crate::onboarding::OnboardingSignals;

/// Onboarding / profile service.
#[async_trait]
pub trait OnboardingSignalPort: Send + Sync {
    /// Resolve the onboarding flags and profile record for `user_id`.
    async fn fetch_onboarding_signals(&self, user_id: &str) -> Result<OnboardingSignals>;

    /// Drop any cached answer so the next fetch goes to the source.
    async fn invalidate_cache(&self, user_id: &str) -> Result<()>;
}
