//! Auth domain module.
//!
//! Holds the authentication session and the pure reducer that is the only
//! way the session changes.

pub mod action;
pub mod state;
pub mod state_machine;

pub use action::AuthAction;
pub use state::{AuthSession, AuthStatus};
pub use state_machine::AuthStateMachine;

/// Error shown when the persisted session cannot be read or parsed.
pub const CHECK_STATUS_FAILED: &str = "Failed to check authentication status";
/// Error shown when persisting the session or the login round trip fails.
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
/// Error shown when clearing the persisted session fails.
pub const LOGOUT_FAILED: &str = "Logout failed. Please try again.";
