pub mod app_lifecycle;
pub mod auth;
pub mod internal;
pub mod onboarding;
pub mod recovery;

pub use app_lifecycle::{LaunchPlan, NavigationStatePersister, PrepareLaunch};
pub use auth::{AuthContext, AuthOrchestrator};
pub use internal::{BestEffortWriter, MountGuard};
pub use onboarding::{OnboardingContext, RefreshOnboardingSignals};
pub use recovery::RecoveryCoordinator;
