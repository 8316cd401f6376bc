mod best_effort;
mod mount;

pub use best_effort::BestEffortWriter;
pub use mount::MountGuard;
