//! Navigation domain module.
//!
//! Maps the combined auth and onboarding state to exactly one route.

pub mod resolver;
pub mod route;

pub use resolver::resolve;
pub use route::{Route, WizardEntry, WizardStep};
