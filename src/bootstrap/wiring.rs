//! Dependency wiring.
//!
//! Turns an [`AppConfig`] into concrete adapters and the use cases the CLI
//! drives. Nothing here touches the store; failures are limited to paths
//! that can never work.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use jb_app::usecases::{NavigationStatePersister, PrepareLaunch};
use jb_app::SessionDeps;
use jb_core::config::AppConfig;
use jb_core::ports::{KeyValueStorePort, RecoveryPromptPort};
use jb_infra::storage::default_store_path;
use jb_infra::{FileKeyValueStore, SimulatedAuthBackend, StoredOnboardingSignalSource, SystemClock};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("No store path configured and the platform has no data directory")]
    NoDataDir,

    #[error("Store path is a directory: {0}")]
    StorePathIsDir(PathBuf),
}

/// Everything the binary needs, built from one config.
pub struct AppServices {
    pub store_path: PathBuf,
    pub session: SessionDeps,
    pub onboarding: Arc<StoredOnboardingSignalSource>,
    pub launch: PrepareLaunch,
    pub navigation: NavigationStatePersister,
}

fn resolve_store_path(config: &AppConfig) -> WiringResult<PathBuf> {
    let path = if config.store_path.as_os_str().is_empty() {
        default_store_path().ok_or(WiringError::NoDataDir)?
    } else {
        config.store_path.clone()
    };
    if path.is_dir() {
        return Err(WiringError::StorePathIsDir(path));
    }
    Ok(path)
}

pub fn wire_dependencies(
    config: &AppConfig,
    prompt: Arc<dyn RecoveryPromptPort>,
) -> WiringResult<AppServices> {
    let store_path = resolve_store_path(config)?;
    info!(store = %store_path.display(), platform = ?config.platform, "wiring dependencies");

    let store: Arc<dyn KeyValueStorePort> = Arc::new(FileKeyValueStore::new(store_path.clone()));
    let onboarding = Arc::new(StoredOnboardingSignalSource::new(store.clone()));
    let session = SessionDeps {
        store: store.clone(),
        onboarding: onboarding.clone(),
        backend: Arc::new(SimulatedAuthBackend::new(config.login_round_trip)),
        prompt,
        recovery_policy: config.recovery,
    };

    Ok(AppServices {
        store_path,
        session,
        onboarding,
        launch: PrepareLaunch::new(
            store.clone(),
            Arc::new(SystemClock),
            config.cold_start,
            config.platform,
        ),
        navigation: NavigationStatePersister::new(store),
    })
}
