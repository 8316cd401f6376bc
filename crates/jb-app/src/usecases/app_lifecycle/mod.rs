//! App lifecycle use cases: what happens before the first route renders.

mod navigation_state;
mod prepare_launch;

pub use navigation_state::NavigationStatePersister;
pub use prepare_launch::{LaunchPlan, PrepareLaunch};
