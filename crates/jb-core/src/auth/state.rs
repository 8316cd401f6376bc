use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Authentication session snapshot.
///
/// `is_authenticated == user.is_some()` holds in every state except while
/// `is_loading` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

impl Default for AuthSession {
    /// The session starts in `Loading` until the first status check lands.
    fn default() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            error: None,
        }
    }
}

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
    Errored,
}

impl AuthSession {
    pub fn status(&self) -> AuthStatus {
        if self.is_loading {
            AuthStatus::Loading
        } else if self.error.is_some() {
            AuthStatus::Errored
        } else if self.is_authenticated {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    }

    /// Whether the authentication flag agrees with the user slot.
    pub fn is_consistent(&self) -> bool {
        self.is_loading || self.is_authenticated == self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}
