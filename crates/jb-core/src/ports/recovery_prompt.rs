use anyhow::Result;
use async_trait::async_trait;

/// Blocking confirmation shown once automatic recovery gives up.
#[async_trait]
pub trait RecoveryPromptPort: Send + Sync {
    /// Resolves when the user acknowledges. The caller logs out afterwards
    /// whether or not the prompt itself succeeded.
    async fn confirm_forced_logout(&self, attempts: u32) -> Result<()>;
}
