use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Actions accepted by the auth reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthAction {
    /// An auth operation started.
    Loading,
    /// Login round trip completed.
    Success { user: UserProfile },
    /// An auth operation failed.
    Error { message: String },
    /// Session cleared.
    Logout,
    /// Session restored from storage, `None` when nothing was stored.
    Restore { user: Option<UserProfile> },
}

impl AuthAction {
    /// Short name used in transition logs.
    pub fn name(&self) -> &'static str {
        match self {
            AuthAction::Loading => "AUTH_LOADING",
            AuthAction::Success { .. } => "AUTH_SUCCESS",
            AuthAction::Error { .. } => "AUTH_ERROR",
            AuthAction::Logout => "AUTH_LOGOUT",
            AuthAction::Restore { .. } => "AUTH_RESTORE",
        }
    }
}
