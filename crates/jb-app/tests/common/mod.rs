#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use jb_app::{SessionDeps, SessionRuntime};
use jb_core::onboarding::OnboardingSignals;
use jb_core::ports::{KeyValueStorePort, OnboardingSignalPort, RecoveryPromptPort};
use jb_core::recovery::RecoveryPolicy;
use jb_core::storage_keys::SESSION_DATA_KEY;
use jb_core::user::UserProfile;
use jb_infra::{InMemoryKeyValueStore, SimulatedAuthBackend, StoredOnboardingSignalSource};

pub fn ana() -> UserProfile {
    UserProfile::new("u-1", "ana@example.com").with_name("Ana")
}

pub fn session_json(user: &UserProfile) -> String {
    serde_json::to_string(user).unwrap()
}

/// Store wrapper that counts reads of the persisted session, i.e. how many
/// times `check_auth_status` reached the store.
pub struct CountingStore {
    inner: Arc<dyn KeyValueStorePort>,
    session_reads: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            inner,
            session_reads: AtomicUsize::new(0),
        }
    }

    pub fn session_reads(&self) -> usize {
        self.session_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStorePort for CountingStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if key == SESSION_DATA_KEY {
            self.session_reads.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, keys: &[&str]) -> anyhow::Result<()> {
        self.inner.remove(keys).await
    }
}

/// Onboarding service that never answers.
#[derive(Default)]
pub struct StuckSignals {
    pub fetches: AtomicUsize,
    pub invalidations: AtomicUsize,
}

#[async_trait]
impl OnboardingSignalPort for StuckSignals {
    async fn fetch_onboarding_signals(&self, _user_id: &str) -> anyhow::Result<OnboardingSignals> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(OnboardingSignals::unknown())
    }

    async fn invalidate_cache(&self, _user_id: &str) -> anyhow::Result<()> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Delays fetches for one user and passes everything through.
pub struct SlowFor {
    pub inner: Arc<dyn OnboardingSignalPort>,
    pub user_id: String,
    pub delay: Duration,
}

#[async_trait]
impl OnboardingSignalPort for SlowFor {
    async fn fetch_onboarding_signals(&self, user_id: &str) -> anyhow::Result<OnboardingSignals> {
        if user_id == self.user_id {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch_onboarding_signals(user_id).await
    }

    async fn invalidate_cache(&self, user_id: &str) -> anyhow::Result<()> {
        self.inner.invalidate_cache(user_id).await
    }
}

#[derive(Default)]
pub struct RecordingPrompt {
    pub confirmations: Mutex<Vec<u32>>,
}

#[async_trait]
impl RecoveryPromptPort for RecordingPrompt {
    async fn confirm_forced_logout(&self, attempts: u32) -> anyhow::Result<()> {
        self.confirmations.lock().unwrap().push(attempts);
        Ok(())
    }
}

pub struct Harness {
    pub memory: Arc<InMemoryKeyValueStore>,
    pub store: Arc<CountingStore>,
    pub backend: Arc<SimulatedAuthBackend>,
    pub prompt: Arc<RecordingPrompt>,
    pub deps: SessionDeps,
}

impl Harness {
    /// Real onboarding source over the shared store.
    pub fn new(memory: InMemoryKeyValueStore, policy: RecoveryPolicy) -> Self {
        let memory = Arc::new(memory);
        let store = Arc::new(CountingStore::new(memory.clone()));
        let onboarding = Arc::new(StoredOnboardingSignalSource::new(store.clone()));
        Self::assemble(memory, store, onboarding, policy)
    }

    /// Real onboarding source wrapped by `wrap`.
    pub fn with_source(
        memory: InMemoryKeyValueStore,
        policy: RecoveryPolicy,
        wrap: impl FnOnce(Arc<dyn OnboardingSignalPort>) -> Arc<dyn OnboardingSignalPort>,
    ) -> Self {
        let memory = Arc::new(memory);
        let store = Arc::new(CountingStore::new(memory.clone()));
        let onboarding = wrap(Arc::new(StoredOnboardingSignalSource::new(store.clone())));
        Self::assemble(memory, store, onboarding, policy)
    }

    /// Onboarding service that never settles.
    pub fn stuck(memory: InMemoryKeyValueStore, policy: RecoveryPolicy) -> (Self, Arc<StuckSignals>) {
        let memory = Arc::new(memory);
        let store = Arc::new(CountingStore::new(memory.clone()));
        let signals = Arc::new(StuckSignals::default());
        (Self::assemble(memory, store, signals.clone(), policy), signals)
    }

    fn assemble(
        memory: Arc<InMemoryKeyValueStore>,
        store: Arc<CountingStore>,
        onboarding: Arc<dyn OnboardingSignalPort>,
        policy: RecoveryPolicy,
    ) -> Self {
        let backend = Arc::new(SimulatedAuthBackend::new(Duration::from_millis(1000)));
        let prompt = Arc::new(RecordingPrompt::default());
        let deps = SessionDeps {
            store: store.clone(),
            onboarding,
            backend: backend.clone(),
            prompt: prompt.clone(),
            recovery_policy: policy,
        };
        Self {
            memory,
            store,
            backend,
            prompt,
            deps,
        }
    }

    pub async fn mount(&self) -> SessionRuntime {
        SessionRuntime::mount(self.deps.clone()).await
    }
}
