//! Auth use cases.
//!
//! This module exposes the auth orchestrator and its shared context.

mod context;
pub mod orchestrator;

pub use context::AuthContext;
pub use orchestrator::{AuthError, AuthOrchestrator};
