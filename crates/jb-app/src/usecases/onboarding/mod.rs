//! Onboarding use cases
//!
//! Keeps the onboarding signals of the signed-in user in step with the auth
//! session. The signals are replaced wholesale on every refresh; a failed
//! fetch leaves them unknown rather than stale.

mod context;
pub mod refresh;

pub use context::OnboardingContext;
pub use refresh::RefreshOnboardingSignals;
