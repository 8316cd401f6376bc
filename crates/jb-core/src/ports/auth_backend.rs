use anyhow::Result;
use async_trait::async_trait;

use crate::user::UserProfile;

/// Remote round trip performed by `login`.
#[async_trait]
pub trait AuthBackendPort: Send + Sync {
    async fn authenticate(&self, user: &UserProfile) -> Result<()>;
}
