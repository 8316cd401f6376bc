//! Port interfaces for the application layer
//!
//! Ports define the contract between the session logic (use cases) and the
//! collaborators it does not own: the persisted key-value store, the
//! onboarding/profile service, the auth backend and the blocking prompt UI.
//! Every call may fail; failures come back as `anyhow::Error` and the use
//! cases decide how to surface them.

mod auth_backend;
mod clock;
pub mod errors;
mod key_value_store;
mod onboarding;
mod recovery_prompt;

pub use auth_backend::AuthBackendPort;
pub use clock::ClockPort;
pub use errors::StorageError;
pub use key_value_store::KeyValueStorePort;
pub use onboarding::OnboardingSignalPort;
pub use recovery_prompt::RecoveryPromptPort;
