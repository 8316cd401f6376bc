//! User domain models.

use serde::{Deserialize, Serialize};

/// Authenticated user as persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Marketplace role chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Looks for jobs.
    Worker,
    /// Posts jobs.
    Employer,
}

/// Per-user profile record owned by the profile service.
///
/// Presence of a record means the onboarding lookup has run at least once for
/// this user; the individual fields say which onboarding steps remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub profile_completed: bool,
}

impl UserRecord {
    /// Fresh record for a user that has not started onboarding.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            city: None,
            role: None,
            profile_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_round_trips_without_name() {
        let user = UserProfile::new("u-1", "ana@example.com");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("name"));
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn user_record_tolerates_missing_fields() {
        let record: UserRecord = serde_json::from_str(r#"{"user_id":"u-2"}"#).unwrap();
        assert_eq!(record, UserRecord::new("u-2"));
    }

    #[test]
    fn user_role_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::Employer).unwrap(),
            "\"employer\""
        );
    }
}
