//! Recovery domain module.
//!
//! Bounded automatic retry for sessions whose onboarding signals never
//! settle.

pub mod policy;
pub mod state_machine;

pub use policy::{
    RecoveryPolicy, RecoveryTrigger, DEFAULT_MAX_RECOVERY_ATTEMPTS, DEFAULT_SETTLE_DELAY,
};
pub use state_machine::{
    RecoveryAction, RecoveryEvent, RecoveryObservation, RecoveryPhase, RecoveryState,
    RecoveryStateMachine,
};
