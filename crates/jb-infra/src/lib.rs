//! # jb-infra
//!
//! Adapters for the ports declared in `jb-core`: a JSON file key-value store,
//! an in-memory store, the system clock, the simulated auth backend and the
//! store-backed onboarding signal source.

pub mod auth;
pub mod onboarding;
pub mod storage;
pub mod time;

pub use auth::SimulatedAuthBackend;
pub use onboarding::StoredOnboardingSignalSource;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
