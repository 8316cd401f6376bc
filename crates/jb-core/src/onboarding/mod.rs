//! Onboarding domain models
//!
//! The three onboarding flags are three-valued: `None` means the lookup has
//! not produced an answer yet and must never be read as `false`.

use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// Onboarding signals for the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSignals {
    pub needs_city_selection: Option<bool>,
    pub needs_role_selection: Option<bool>,
    pub needs_profile_setup: Option<bool>,
    pub user_record: Option<UserRecord>,
}

impl OnboardingSignals {
    /// Nothing loaded yet.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Derive the flags from a loaded profile record.
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            needs_city_selection: Some(record.city.is_none()),
            needs_role_selection: Some(record.role.is_none()),
            needs_profile_setup: Some(!record.profile_completed),
            user_record: Some(record),
        }
    }

    /// All three flags are known.
    pub fn is_settled(&self) -> bool {
        self.needs_city_selection.is_some()
            && self.needs_role_selection.is_some()
            && self.needs_profile_setup.is_some()
    }

    /// The loaded record, only if it was fetched for `user_id`.
    ///
    /// Signals left over from a previous user count as not loaded.
    pub fn record_for(&self, user_id: Option<&str>) -> Option<&UserRecord> {
        self.user_record
            .as_ref()
            .filter(|record| Some(record.user_id.as_str()) == user_id)
    }

    /// No onboarding step remains. `false` while anything is still unknown.
    pub fn is_complete(&self) -> bool {
        self.needs_city_selection == Some(false)
            && self.needs_role_selection == Some(false)
            && self.needs_profile_setup == Some(false)
    }
}
