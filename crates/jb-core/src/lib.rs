//! # jb-core
//!
//! Core domain models and session state logic for the JobBoard client.
//!
//! This crate contains pure decision logic without any infrastructure
//! dependencies: the auth reducer, the navigation resolver, the recovery
//! state machine and the cold-start classification. Side effects live behind
//! the traits in [`ports`].

pub mod auth;
pub mod config;
pub mod launch;
pub mod navigation;
pub mod onboarding;
pub mod ports;
pub mod recovery;
pub mod storage_keys;
pub mod user;

// Re-export commonly used types at the crate root
pub use auth::{AuthAction, AuthSession, AuthStateMachine, AuthStatus};
pub use config::AppConfig;
pub use launch::{ColdStartPolicy, LaunchKind, Platform, SessionMarker};
pub use navigation::{resolve, Route, WizardEntry, WizardStep};
pub use onboarding::OnboardingSignals;
pub use recovery::{
    RecoveryAction, RecoveryEvent, RecoveryObservation, RecoveryPhase, RecoveryPolicy,
    RecoveryState, RecoveryStateMachine, RecoveryTrigger,
};
pub use user::{UserProfile, UserRecord, UserRole};
