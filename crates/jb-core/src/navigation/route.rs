use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// Top-level screen the client should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Login.
    Auth,
    /// Spinner while an auth operation is in flight.
    AuthLoading,
    /// Spinner while the onboarding signals are loading.
    OnboardingLoading,
    CitySelection,
    /// Onboarding wizard stack.
    OnboardingWizard(WizardEntry),
    /// Authenticated application shell.
    Main,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Auth => "Auth",
            Route::AuthLoading => "AuthLoading",
            Route::OnboardingLoading => "OnboardingLoading",
            Route::CitySelection => "CitySelection",
            Route::OnboardingWizard(_) => "OnboardingWizard",
            Route::Main => "Main",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::OnboardingWizard(entry) => {
                write!(f, "{}({:?})", self.name(), entry.initial_step)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// How the wizard stack is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardEntry {
    pub initial_step: WizardStep,
    /// Back navigation and swipe gestures. Always off inside the wizard.
    pub gestures_enabled: bool,
}

impl WizardEntry {
    pub fn starting_at(initial_step: WizardStep) -> Self {
        Self {
            initial_step,
            gestures_enabled: false,
        }
    }
}

/// Screens of the onboarding wizard, in stack order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    RoleSelection,
    WorkerProfileSetup,
    EmployerProfileSetup,
    SkillsPicker,
    CategoryPicker,
    Success,
}

impl WizardStep {
    pub fn profile_setup_for(role: UserRole) -> Self {
        match role {
            UserRole::Worker => WizardStep::WorkerProfileSetup,
            UserRole::Employer => WizardStep::EmployerProfileSetup,
        }
    }

    /// Step after `self`. Leaving role selection requires a chosen role.
    pub fn next(self, role: Option<UserRole>) -> Option<WizardStep> {
        match self {
            WizardStep::RoleSelection => role.map(Self::profile_setup_for),
            WizardStep::WorkerProfileSetup => Some(WizardStep::SkillsPicker),
            WizardStep::EmployerProfileSetup => Some(WizardStep::CategoryPicker),
            WizardStep::SkillsPicker | WizardStep::CategoryPicker => Some(WizardStep::Success),
            WizardStep::Success => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_walks_through_skills() {
        let role = Some(UserRole::Worker);
        let mut step = WizardStep::RoleSelection;
        let mut visited = vec![step];
        while let Some(next) = step.next(role) {
            visited.push(next);
            step = next;
        }
        assert_eq!(
            visited,
            vec![
                WizardStep::RoleSelection,
                WizardStep::WorkerProfileSetup,
                WizardStep::SkillsPicker,
                WizardStep::Success,
            ]
        );
    }

    #[test]
    fn employer_picks_categories() {
        let role = Some(UserRole::Employer);
        assert_eq!(
            WizardStep::RoleSelection.next(role),
            Some(WizardStep::EmployerProfileSetup)
        );
        assert_eq!(
            WizardStep::EmployerProfileSetup.next(role),
            Some(WizardStep::CategoryPicker)
        );
    }

    #[test]
    fn role_selection_cannot_advance_without_role() {
        assert_eq!(WizardStep::RoleSelection.next(None), None);
    }

    #[test]
    fn wizard_entry_disables_gestures() {
        assert!(!WizardEntry::starting_at(WizardStep::Success).gestures_enabled);
    }
}
