//! JobBoard session orchestration layer
//!
//! This crate contains the session use cases: the auth orchestrator, the
//! onboarding signal loader, the recovery coordinator, launch preparation,
//! and [`SessionRuntime`], which ties them into the one object the UI layer
//! talks to.

pub mod session;
pub mod usecases;

pub use session::{RecoveryOutcome, SessionDeps, SessionRuntime};
