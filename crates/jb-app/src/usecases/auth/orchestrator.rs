//! Auth orchestrator.
//!
//! Runs the side effects around the auth reducer: reading and writing the
//! persisted session, the login round trip, and the batched logout removal.
//! None of the public operations return an error. Failures become
//! `AuthSession.error` strings and the caller decides whether to retry.

use std::sync::Arc;

use tracing::{info_span, warn, Instrument};

use jb_core::auth::{
    AuthAction, AuthSession, CHECK_STATUS_FAILED, LOGIN_FAILED, LOGOUT_FAILED,
};
use jb_core::ports::{AuthBackendPort, KeyValueStorePort, StorageError};
use jb_core::storage_keys::{LOGOUT_KEYS, SESSION_DATA_KEY};
use jb_core::user::UserProfile;

use crate::usecases::auth::AuthContext;
use crate::usecases::internal::BestEffortWriter;

/// Errors produced inside auth operations before they are folded into the
/// session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("session storage failed: {0}")]
    Storage(#[source] anyhow::Error),
    #[error(transparent)]
    Corrupt(#[from] StorageError),
    #[error("serialize session failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("auth round trip failed: {0}")]
    RoundTrip(#[source] anyhow::Error),
}

pub struct AuthOrchestrator {
    context: Arc<AuthContext>,
    store: Arc<dyn KeyValueStorePort>,
    backend: Arc<dyn AuthBackendPort>,
    best_effort: BestEffortWriter,
}

impl AuthOrchestrator {
    pub fn new(
        context: Arc<AuthContext>,
        store: Arc<dyn KeyValueStorePort>,
        backend: Arc<dyn AuthBackendPort>,
    ) -> Self {
        Self {
            best_effort: BestEffortWriter::new(store.clone()),
            context,
            store,
            backend,
        }
    }

    pub fn context(&self) -> &Arc<AuthContext> {
        &self.context
    }

    pub fn snapshot(&self) -> AuthSession {
        self.context.snapshot()
    }

    /// Restore the session from the store.
    pub async fn check_auth_status(&self) -> AuthSession {
        let _operation = self.context.acquire_operation_lock().await;
        async {
            self.context.dispatch(AuthAction::Loading);
            let action = match self.read_stored_user().await {
                Ok(user) => AuthAction::Restore { user },
                Err(err) => {
                    warn!(error = %err, "check auth status failed");
                    AuthAction::Error {
                        message: CHECK_STATUS_FAILED.to_string(),
                    }
                }
            };
            self.context.dispatch(action);
            self.context.snapshot()
        }
        .instrument(info_span!("usecase.auth.check_auth_status"))
        .await
    }

    /// Persist `user`, then run the backend round trip.
    ///
    /// If the round trip fails after the session was persisted, the stored
    /// session is rolled back so an errored login leaves nothing to restore.
    pub async fn login(&self, user: UserProfile) -> AuthSession {
        let _operation = self.context.acquire_operation_lock().await;
        let span = info_span!("usecase.auth.login", user_id = %user.id);
        async {
            self.context.dispatch(AuthAction::Loading);
            match self.persist_and_authenticate(&user).await {
                Ok(()) => {
                    self.context.dispatch(AuthAction::Success { user });
                }
                Err(err) => {
                    warn!(error = %err, "login failed");
                    if matches!(err, AuthError::RoundTrip(_)) {
                        self.best_effort.remove(&[SESSION_DATA_KEY]).await;
                    }
                    self.context.dispatch(AuthAction::Error {
                        message: LOGIN_FAILED.to_string(),
                    });
                }
            }
            self.context.snapshot()
        }
        .instrument(span)
        .await
    }

    /// Remove the session and mode preference in one batch.
    ///
    /// A failed removal ends in `ERRORED` while the stored session may still
    /// be present. That inconsistency is surfaced, not retried.
    pub async fn logout(&self) -> AuthSession {
        let _operation = self.context.acquire_operation_lock().await;
        async {
            self.context.dispatch(AuthAction::Loading);
            match self.store.remove(&LOGOUT_KEYS).await {
                Ok(()) => {
                    self.context.dispatch(AuthAction::Logout);
                }
                Err(err) => {
                    warn!(error = %err, "logout failed to clear stored session");
                    self.context.dispatch(AuthAction::Error {
                        message: LOGOUT_FAILED.to_string(),
                    });
                }
            }
            self.context.snapshot()
        }
        .instrument(info_span!("usecase.auth.logout"))
        .await
    }

    /// Drop the error while keeping the current user and auth flag.
    pub fn clear_error(&self) -> AuthSession {
        let current = self.context.snapshot();
        if current.error.is_some() {
            self.context
                .dispatch(AuthAction::Restore { user: current.user });
        }
        self.context.snapshot()
    }

    async fn read_stored_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let raw = self
            .store
            .get(SESSION_DATA_KEY)
            .await
            .map_err(AuthError::Storage)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let user = serde_json::from_str(&raw).map_err(|err| StorageError::Parse {
            key: SESSION_DATA_KEY.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(user))
    }

    async fn persist_and_authenticate(&self, user: &UserProfile) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(user)?;
        self.store
            .set(SESSION_DATA_KEY, &serialized)
            .await
            .map_err(AuthError::Storage)?;
        self.backend
            .authenticate(user)
            .await
            .map_err(AuthError::RoundTrip)
    }
}
