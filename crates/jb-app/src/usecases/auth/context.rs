use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::{debug, info};

use jb_core::auth::{AuthAction, AuthSession, AuthStateMachine};

use crate::usecases::internal::MountGuard;

/// Shared auth context containing the session and the operation lock.
///
/// ## Lock Ordering
/// `operation_lock` serializes whole operations (`login`, `logout`,
/// `check_auth_status`) so a logout can never interleave with a login and
/// leave a stored session behind a logged-out state. The session itself
/// lives in a `watch` channel: every dispatch replaces it atomically, so
/// readers always see a complete snapshot.
pub struct AuthContext {
    state: watch::Sender<AuthSession>,
    operation_lock: Mutex<()>,
    mount: MountGuard,
}

impl AuthContext {
    pub fn new(mount: MountGuard) -> Self {
        let (state, _) = watch::channel(AuthSession::default());
        Self {
            state,
            operation_lock: Mutex::new(()),
            mount,
        }
    }

    pub fn snapshot(&self) -> AuthSession {
        self.state.borrow().clone()
    }

    /// Receiver notified on every applied dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.state.subscribe()
    }

    pub async fn acquire_operation_lock(&self) -> MutexGuard<'_, ()> {
        self.operation_lock.lock().await
    }

    /// Apply `action` through the reducer. Returns `false` when the context
    /// was already unmounted and the action was dropped.
    pub fn dispatch(&self, action: AuthAction) -> bool {
        if !self.mount.is_mounted() {
            debug!(action = action.name(), "auth dispatch after unmount dropped");
            return false;
        }
        let name = action.name();
        self.state.send_modify(|state| {
            let from = state.status();
            *state = AuthStateMachine::reduce(state.clone(), action);
            info!(from = ?from, to = ?state.status(), action = name, "auth state transition");
        });
        true
    }
}
