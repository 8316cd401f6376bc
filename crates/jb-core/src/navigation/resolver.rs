//! Navigation destination resolver.
//!
//! `resolve` is evaluated on every render. It is pure and total: every
//! `(auth, onboarding)` pair maps to exactly one route, first match wins.
//! Every "signals not ready" case lands on the same
//! [`Route::OnboardingLoading`] so the shell never flips between two
//! different spinners for one underlying cause.

use crate::auth::AuthSession;
use crate::navigation::{Route, WizardEntry, WizardStep};
use crate::onboarding::OnboardingSignals;

pub fn resolve(auth: &AuthSession, onboarding: &OnboardingSignals) -> Route {
    if !auth.is_authenticated {
        return Route::Auth;
    }
    if auth.is_loading {
        return Route::AuthLoading;
    }

    let Some(record) = onboarding.record_for(auth.user_id()) else {
        return Route::OnboardingLoading;
    };
    let (Some(needs_city), Some(needs_role), Some(needs_profile)) = (
        onboarding.needs_city_selection,
        onboarding.needs_role_selection,
        onboarding.needs_profile_setup,
    ) else {
        return Route::OnboardingLoading;
    };

    if needs_city {
        return Route::CitySelection;
    }
    if needs_role || needs_profile {
        let initial_step = match (needs_role, record.role) {
            (false, Some(role)) => WizardStep::profile_setup_for(role),
            _ => WizardStep::RoleSelection,
        };
        return Route::OnboardingWizard(WizardEntry::starting_at(initial_step));
    }
    Route::Main
}
