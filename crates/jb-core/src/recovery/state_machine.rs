//! Recovery state machine.
//!
//! `Idle -> Recovering -> (Idle | Exhausted)`. Pure: the caller runs the
//! returned actions and reports back with [`RecoveryEvent::CycleSettled`].

use serde::{Deserialize, Serialize};

use crate::auth::AuthSession;
use crate::onboarding::OnboardingSignals;
use crate::recovery::{RecoveryPolicy, RecoveryTrigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryPhase {
    Idle,
    /// One cycle in flight. Doubles as the mutual-exclusion flag.
    Recovering,
    /// Cap reached, forced logout requested. Terminal until remount.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryState {
    pub phase: RecoveryPhase,
    /// Never decreases and never exceeds the policy cap.
    pub attempts: u32,
}

impl Default for RecoveryState {
    fn default() -> Self {
        Self {
            phase: RecoveryPhase::Idle,
            attempts: 0,
        }
    }
}

impl RecoveryState {
    pub fn is_recovering(&self) -> bool {
        self.phase == RecoveryPhase::Recovering
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == RecoveryPhase::Exhausted
    }
}

/// What one look at the session says about recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryObservation {
    /// Not authenticated, still loading, or fully settled.
    Consistent,
    /// Authenticated but no record was loaded for this user.
    MissingUserRecord,
    /// Record present but at least one onboarding flag is still unknown.
    UnsettledSignals,
}

impl RecoveryObservation {
    pub fn observe(auth: &AuthSession, onboarding: &OnboardingSignals) -> Self {
        if !auth.is_authenticated || auth.is_loading {
            return RecoveryObservation::Consistent;
        }
        if onboarding.record_for(auth.user_id()).is_none() {
            return RecoveryObservation::MissingUserRecord;
        }
        if !onboarding.is_settled() {
            return RecoveryObservation::UnsettledSignals;
        }
        RecoveryObservation::Consistent
    }

    pub fn is_invalid(&self) -> bool {
        !matches!(self, RecoveryObservation::Consistent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryEvent {
    Observed(RecoveryObservation),
    CycleSettled,
}

/// Side effects produced by recovery transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryAction {
    /// Re-run `check_auth_status`, then wait the settle delay.
    RunCycle { attempt: u32 },
    /// Show the blocking confirmation, then force a logout.
    ConfirmForcedLogout { attempts: u32 },
}

pub struct RecoveryStateMachine;

impl RecoveryStateMachine {
    pub fn transition(
        state: RecoveryState,
        event: RecoveryEvent,
        policy: &RecoveryPolicy,
    ) -> (RecoveryState, Vec<RecoveryAction>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(phase = ?state.phase, attempts = state.attempts, event = ?event, "recovery transition");

        match (state.phase, event) {
            (RecoveryPhase::Exhausted, _) => (state, Vec::new()),
            (RecoveryPhase::Recovering, RecoveryEvent::CycleSettled) => (
                RecoveryState {
                    phase: RecoveryPhase::Idle,
                    ..state
                },
                Vec::new(),
            ),
            (RecoveryPhase::Recovering, RecoveryEvent::Observed(_)) => (state, Vec::new()),
            (RecoveryPhase::Idle, RecoveryEvent::CycleSettled) => (state, Vec::new()),
            (RecoveryPhase::Idle, RecoveryEvent::Observed(observation)) => {
                if !observation.is_invalid() {
                    return (state, Vec::new());
                }
                if state.attempts >= policy.max_attempts {
                    return (
                        RecoveryState {
                            phase: RecoveryPhase::Exhausted,
                            ..state
                        },
                        vec![RecoveryAction::ConfirmForcedLogout {
                            attempts: state.attempts,
                        }],
                    );
                }
                if policy.trigger == RecoveryTrigger::FirstAttemptOnly && state.attempts > 0 {
                    return (state, Vec::new());
                }
                let attempt = state.attempts + 1;
                (
                    RecoveryState {
                        phase: RecoveryPhase::Recovering,
                        attempts: attempt,
                    },
                    vec![RecoveryAction::RunCycle { attempt }],
                )
            }
        }
    }
}
