use anyhow::Result;
use async_trait::async_trait;

/// Persisted string key-value store.
///
/// There is no multi-key transaction: `remove` with several keys is a single
/// batched call, but concurrent writers race with last-write-wins.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove all `keys` in one batch. Missing keys are not an error.
    async fn remove(&self, keys: &[&str]) -> Result<()>;
}
