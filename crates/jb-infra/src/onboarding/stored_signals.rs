//! Onboarding signals derived from the stored user record.
//!
//! Answers are cached per user under `onboarding_cache/<user_id>`. A user
//! with no record yet gets a fresh one, so a brand-new account lands on city
//! selection instead of an unsettled loading screen.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use jb_core::onboarding::OnboardingSignals;
use jb_core::ports::{KeyValueStorePort, OnboardingSignalPort, StorageError};
use jb_core::storage_keys::{onboarding_cache_key, user_record_key};
use jb_core::user::UserRecord;

pub struct StoredOnboardingSignalSource {
    store: Arc<dyn KeyValueStorePort>,
}

impl StoredOnboardingSignalSource {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    pub async fn load_user_record(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let key = user_record_key(user_id);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };
        let record = serde_json::from_str(&raw).map_err(|err| StorageError::Parse {
            key,
            reason: err.to_string(),
        })?;
        Ok(Some(record))
    }

    /// Write `record` and drop the cached signals for its user.
    pub async fn save_user_record(&self, record: &UserRecord) -> Result<()> {
        let raw = serde_json::to_string(record).context("serialize user record failed")?;
        self.store
            .set(&user_record_key(&record.user_id), &raw)
            .await?;
        self.invalidate_cache(&record.user_id).await
    }

    async fn cached(&self, user_id: &str) -> Option<OnboardingSignals> {
        let raw = match self.store.get(&onboarding_cache_key(user_id)).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(user_id, error = %err, "onboarding cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(signals) => Some(signals),
            Err(err) => {
                warn!(user_id, error = %err, "onboarding cache is malformed, refetching");
                None
            }
        }
    }
}

#[async_trait]
impl OnboardingSignalPort for StoredOnboardingSignalSource {
    async fn fetch_onboarding_signals(&self, user_id: &str) -> Result<OnboardingSignals> {
        if let Some(signals) = self.cached(user_id).await {
            debug!(user_id, "onboarding signals served from cache");
            return Ok(signals);
        }

        let record = match self.load_user_record(user_id).await? {
            Some(record) => record,
            None => {
                let record = UserRecord::new(user_id);
                let raw = serde_json::to_string(&record).context("serialize user record failed")?;
                self.store.set(&user_record_key(user_id), &raw).await?;
                debug!(user_id, "created empty user record");
                record
            }
        };

        let signals = OnboardingSignals::from_record(record);
        match serde_json::to_string(&signals) {
            Ok(raw) => {
                if let Err(err) = self.store.set(&onboarding_cache_key(user_id), &raw).await {
                    warn!(user_id, error = %err, "onboarding cache write failed");
                }
            }
            Err(err) => warn!(user_id, error = %err, "serialize onboarding cache failed"),
        }
        Ok(signals)
    }

    async fn invalidate_cache(&self, user_id: &str) -> Result<()> {
        let key = onboarding_cache_key(user_id);
        self.store.remove(&[key.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use jb_core::user::UserRole;

    fn source() -> (Arc<InMemoryKeyValueStore>, StoredOnboardingSignalSource) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (store.clone(), StoredOnboardingSignalSource::new(store))
    }

    #[tokio::test]
    async fn new_user_gets_a_record_and_needs_everything() {
        let (store, source) = source();
        let signals = source.fetch_onboarding_signals("u-1").await.unwrap();

        assert_eq!(signals.needs_city_selection, Some(true));
        assert_eq!(signals.needs_role_selection, Some(true));
        assert_eq!(signals.needs_profile_setup, Some(true));
        assert!(store.contains(&user_record_key("u-1")).await);
        assert!(store.contains(&onboarding_cache_key("u-1")).await);
    }

    #[tokio::test]
    async fn cache_wins_until_invalidated() {
        let (_store, source) = source();
        source.fetch_onboarding_signals("u-1").await.unwrap();

        // Bypass save_user_record so the cache goes stale.
        let mut record = UserRecord::new("u-1");
        record.city = Some("Lisbon".into());
        record.role = Some(UserRole::Worker);
        record.profile_completed = true;
        let raw = serde_json::to_string(&record).unwrap();
        source
            .store
            .set(&user_record_key("u-1"), &raw)
            .await
            .unwrap();

        let stale = source.fetch_onboarding_signals("u-1").await.unwrap();
        assert_eq!(stale.needs_city_selection, Some(true));

        source.invalidate_cache("u-1").await.unwrap();
        let fresh = source.fetch_onboarding_signals("u-1").await.unwrap();
        assert!(fresh.is_complete());
    }

    #[tokio::test]
    async fn saving_a_record_refreshes_signals() {
        let (_store, source) = source();
        source.fetch_onboarding_signals("u-1").await.unwrap();

        let mut record = UserRecord::new("u-1");
        record.city = Some("Porto".into());
        source.save_user_record(&record).await.unwrap();

        let signals = source.fetch_onboarding_signals("u-1").await.unwrap();
        assert_eq!(signals.needs_city_selection, Some(false));
        assert_eq!(signals.needs_role_selection, Some(true));
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            user_record_key("u-1"),
            "{broken".to_string(),
        )]));
        let source = StoredOnboardingSignalSource::new(store);

        let err = source.fetch_onboarding_signals("u-1").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Parse { .. })
        ));
    }
}
