use tokio::sync::{watch, Mutex};
use tracing::info;

use jb_core::auth::AuthSession;
use jb_core::onboarding::OnboardingSignals;
use jb_core::recovery::{
    RecoveryAction, RecoveryEvent, RecoveryObservation, RecoveryPolicy, RecoveryState,
    RecoveryStateMachine,
};

/// Holds the recovery state and applies transitions one at a time.
///
/// The coordinator only decides. [`crate::SessionRuntime`] runs the returned
/// actions and reports back through [`RecoveryCoordinator::settle`].
pub struct RecoveryCoordinator {
    policy: RecoveryPolicy,
    state: watch::Sender<RecoveryState>,
    transition_lock: Mutex<()>,
}

impl RecoveryCoordinator {
    pub fn new(policy: RecoveryPolicy) -> Self {
        let (state, _) = watch::channel(RecoveryState::default());
        Self {
            policy,
            state,
            transition_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &RecoveryPolicy {
        &self.policy
    }

    pub fn state(&self) -> RecoveryState {
        *self.state.borrow()
    }

    /// Look at a session snapshot and return what, if anything, to run.
    pub async fn observe(
        &self,
        auth: &AuthSession,
        onboarding: &OnboardingSignals,
    ) -> Vec<RecoveryAction> {
        let observation = RecoveryObservation::observe(auth, onboarding);
        self.apply(RecoveryEvent::Observed(observation)).await
    }

    /// Mark the in-flight cycle as finished.
    pub async fn settle(&self) {
        self.apply(RecoveryEvent::CycleSettled).await;
    }

    async fn apply(&self, event: RecoveryEvent) -> Vec<RecoveryAction> {
        let _transition = self.transition_lock.lock().await;
        let from = self.state();
        let (next, actions) = RecoveryStateMachine::transition(from, event, &self.policy);
        if next != from {
            info!(
                from = ?from.phase,
                to = ?next.phase,
                attempts = next.attempts,
                event = ?event,
                "recovery state transition"
            );
            self.state.send_replace(next);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jb_core::recovery::RecoveryPhase;
    use jb_core::user::{UserProfile, UserRecord};

    fn signed_in() -> AuthSession {
        AuthSession {
            is_authenticated: true,
            is_loading: false,
            user: Some(UserProfile::new("u-1", "ana@example.com")),
            error: None,
        }
    }

    #[tokio::test]
    async fn stuck_signals_trigger_one_cycle_at_a_time() {
        let coordinator = RecoveryCoordinator::new(RecoveryPolicy::default());
        let stuck = OnboardingSignals::unknown();

        let first = coordinator.observe(&signed_in(), &stuck).await;
        assert_eq!(first, vec![RecoveryAction::RunCycle { attempt: 1 }]);
        assert!(coordinator.state().is_recovering());

        let second = coordinator.observe(&signed_in(), &stuck).await;
        assert!(second.is_empty());

        coordinator.settle().await;
        assert_eq!(coordinator.state().phase, RecoveryPhase::Idle);
        assert_eq!(coordinator.state().attempts, 1);
    }

    #[tokio::test]
    async fn settled_signals_need_no_recovery() {
        let coordinator = RecoveryCoordinator::new(RecoveryPolicy::default());
        let settled = OnboardingSignals::from_record(UserRecord::new("u-1"));

        assert!(coordinator.observe(&signed_in(), &settled).await.is_empty());
        assert_eq!(coordinator.state(), RecoveryState::default());
    }
}
