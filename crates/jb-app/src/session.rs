//! Session runtime: the provider tree the UI mounts.
//!
//! Owns one auth context, one onboarding context and one recovery
//! coordinator. A forced logout unmounts the runtime; callers build a fresh
//! one with [`SessionRuntime::remount`], which starts every piece of state
//! from its initial value again.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use jb_core::auth::AuthSession;
use jb_core::navigation::{resolve, Route};
use jb_core::onboarding::OnboardingSignals;
use jb_core::ports::{AuthBackendPort, KeyValueStorePort, OnboardingSignalPort, RecoveryPromptPort};
use jb_core::recovery::{RecoveryAction, RecoveryPolicy, RecoveryState};
use jb_core::user::UserProfile;

use crate::usecases::{
    AuthContext, AuthOrchestrator, MountGuard, OnboardingContext, RecoveryCoordinator,
    RefreshOnboardingSignals,
};

/// Everything a runtime needs from the outside world.
#[derive(Clone)]
pub struct SessionDeps {
    pub store: Arc<dyn KeyValueStorePort>,
    pub onboarding: Arc<dyn OnboardingSignalPort>,
    pub backend: Arc<dyn AuthBackendPort>,
    pub prompt: Arc<dyn RecoveryPromptPort>,
    pub recovery_policy: RecoveryPolicy,
}

/// Result of one pass of [`SessionRuntime::run_recovery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// Nothing to recover, a cycle is already in flight, or the policy holds.
    Idle,
    CycleCompleted { attempt: u32 },
    /// The cap was reached. The runtime is now logged out and unmounted.
    ForcedLogout { attempts: u32 },
}

pub struct SessionRuntime {
    deps: SessionDeps,
    mount: MountGuard,
    auth: AuthOrchestrator,
    onboarding: Arc<OnboardingContext>,
    refresh: RefreshOnboardingSignals,
    recovery: RecoveryCoordinator,
}

impl SessionRuntime {
    /// Build a runtime in the initial loading state without touching the store.
    pub fn new(deps: SessionDeps) -> Self {
        let mount = MountGuard::new();
        let auth_context = Arc::new(AuthContext::new(mount.clone()));
        let onboarding = Arc::new(OnboardingContext::new(mount.clone()));
        Self {
            auth: AuthOrchestrator::new(auth_context, deps.store.clone(), deps.backend.clone()),
            refresh: RefreshOnboardingSignals::new(deps.onboarding.clone(), onboarding.clone()),
            recovery: RecoveryCoordinator::new(deps.recovery_policy),
            onboarding,
            mount,
            deps,
        }
    }

    /// Build a runtime and run the initial `check_auth_status`.
    pub async fn mount(deps: SessionDeps) -> Self {
        let runtime = Self::new(deps);
        runtime
            .check_auth_status()
            .instrument(info_span!("session.mount"))
            .await;
        runtime
    }

    /// Fresh runtime over the same dependencies.
    pub async fn remount(&self) -> Self {
        Self::mount(self.deps.clone()).await
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    pub fn auth_session(&self) -> AuthSession {
        self.auth.snapshot()
    }

    pub fn onboarding_signals(&self) -> OnboardingSignals {
        self.onboarding.snapshot()
    }

    /// Current route, resolved from one consistent pair of snapshots.
    pub fn route(&self) -> Route {
        resolve(&self.auth.snapshot(), &self.onboarding.snapshot())
    }

    pub fn recovery_state(&self) -> RecoveryState {
        self.recovery.state()
    }

    pub async fn check_auth_status(&self) -> AuthSession {
        let session = self.auth.check_auth_status().await;
        if let Some(user_id) = session.user_id() {
            self.onboarding.forget_unless_for(user_id);
        }
        self.refresh.execute(&session).await;
        session
    }

    pub async fn login(&self, user: UserProfile) -> AuthSession {
        if self.onboarding.forget_unless_for(&user.id) {
            info!("onboarding signals of the previous user cleared");
        }
        let session = self.auth.login(user).await;
        self.refresh.execute(&session).await;
        session
    }

    pub async fn logout(&self) -> AuthSession {
        let session = self.auth.logout().await;
        self.refresh.execute(&session).await;
        session
    }

    pub fn clear_error(&self) -> AuthSession {
        self.auth.clear_error()
    }

    /// Observe the current snapshot once and run whatever recovery asks for.
    pub async fn run_recovery(&self) -> RecoveryOutcome {
        if !self.is_mounted() {
            return RecoveryOutcome::Idle;
        }
        let auth = self.auth.snapshot();
        let onboarding = self.onboarding.snapshot();
        let actions = self.recovery.observe(&auth, &onboarding).await;

        let mut outcome = RecoveryOutcome::Idle;
        for action in actions {
            outcome = match action {
                RecoveryAction::RunCycle { attempt } => {
                    self.run_cycle(&auth, attempt)
                        .instrument(info_span!("session.recovery.cycle", attempt))
                        .await
                }
                RecoveryAction::ConfirmForcedLogout { attempts } => {
                    self.force_logout(attempts)
                        .instrument(info_span!("session.recovery.forced_logout", attempts))
                        .await
                }
            };
        }
        outcome
    }

    /// Keep running recovery until it has nothing more to do.
    pub async fn drive_recovery(&self) -> RecoveryOutcome {
        let mut last = RecoveryOutcome::Idle;
        loop {
            match self.run_recovery().await {
                RecoveryOutcome::Idle => return last,
                outcome @ RecoveryOutcome::ForcedLogout { .. } => return outcome,
                outcome => last = outcome,
            }
        }
    }

    async fn run_cycle(&self, auth: &AuthSession, attempt: u32) -> RecoveryOutcome {
        info!(attempt, "recovery cycle started");
        if let Some(user_id) = auth.user_id() {
            if let Err(err) = self.refresh.invalidate(user_id).await {
                warn!(error = %err, "onboarding cache invalidation failed");
            }
        }
        self.check_auth_status().await;
        tokio::time::sleep(self.recovery.policy().settle_delay).await;
        self.recovery.settle().await;
        RecoveryOutcome::CycleCompleted { attempt }
    }

    async fn force_logout(&self, attempts: u32) -> RecoveryOutcome {
        warn!(attempts, "recovery cap reached, forcing logout");
        if let Err(err) = self.deps.prompt.confirm_forced_logout(attempts).await {
            warn!(error = %err, "forced logout confirmation failed");
        }
        self.logout().await;
        self.mount.unmount();
        RecoveryOutcome::ForcedLogout { attempts }
    }
}
