//! Process bootstrap: configuration loading, tracing setup and dependency
//! wiring for the `jobboard` binary.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, resolve_config};
pub use wiring::{wire_dependencies, AppServices, WiringError, WiringResult};
