//! Recovery use cases.

mod coordinator;

pub use coordinator::RecoveryCoordinator;
