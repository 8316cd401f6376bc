//! Persisted key names.
//!
//! These strings are read back by older and newer builds alike; never rename
//! them.

/// Serialized [`crate::user::UserProfile`] of the signed-in user.
pub const SESSION_DATA_KEY: &str = "@jobboard/session_user";
/// Worker / employer mode preference. Cleared together with the session.
pub const MODE_PREFERENCE_KEY: &str = "@jobboard/mode_preference";
/// Opaque serialized navigation tree.
pub const NAVIGATION_STATE_KEY: &str = "@jobboard/navigation_state";
/// Epoch milliseconds of the last recorded launch.
pub const SESSION_ID_KEY: &str = "app_session_id";
/// `"true"` once the splash has been shown.
pub const SPLASH_SHOWN_KEY: &str = "splash_shown_session";

const ONBOARDING_CACHE_PREFIX: &str = "@jobboard/onboarding_cache/";
const USER_RECORD_PREFIX: &str = "@jobboard/user_record/";

/// Keys removed as one batch on logout.
pub const LOGOUT_KEYS: [&str; 2] = [SESSION_DATA_KEY, MODE_PREFERENCE_KEY];

/// Per-user cache of resolved onboarding signals.
pub fn onboarding_cache_key(user_id: &str) -> String {
    format!("{ONBOARDING_CACHE_PREFIX}{user_id}")
}

/// Per-user profile record.
pub fn user_record_key(user_id: &str) -> String {
    format!("{USER_RECORD_PREFIX}{user_id}")
}
