//! Auth reducer.
//!
//! Defines a pure state transition function for the authentication session.

use crate::auth::{AuthAction, AuthSession};

/// Pure auth reducer: no side effects.
pub struct AuthStateMachine;

impl AuthStateMachine {
    pub fn reduce(state: AuthSession, action: AuthAction) -> AuthSession {
        #[cfg(feature = "tracing")]
        tracing::trace!(action = action.name(), from = ?state.status(), "auth reduce");

        match action {
            AuthAction::Loading => AuthSession {
                is_loading: true,
                error: None,
                ..state
            },
            AuthAction::Success { user } => AuthSession {
                is_authenticated: true,
                is_loading: false,
                user: Some(user),
                error: None,
            },
            AuthAction::Error { message } => AuthSession {
                is_authenticated: false,
                is_loading: false,
                user: None,
                error: Some(message),
            },
            AuthAction::Logout => AuthSession {
                is_authenticated: false,
                is_loading: false,
                user: None,
                error: None,
            },
            AuthAction::Restore { user } => AuthSession {
                is_authenticated: user.is_some(),
                is_loading: false,
                user,
                error: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthStateMachine;
    use crate::auth::{AuthAction, AuthSession, AuthStatus};
    use crate::user::UserProfile;

    fn user() -> UserProfile {
        UserProfile::new("u-1", "ana@example.com")
    }

    fn authenticated() -> AuthSession {
        AuthStateMachine::reduce(AuthSession::default(), AuthAction::Success { user: user() })
    }

    #[test]
    fn initial_session_is_loading() {
        let state = AuthSession::default();
        assert_eq!(state.status(), AuthStatus::Loading);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn loading_clears_error_and_keeps_user() {
        let state = AuthSession {
            error: Some("boom".into()),
            ..authenticated()
        };
        let next = AuthStateMachine::reduce(state, AuthAction::Loading);
        assert!(next.is_loading);
        assert!(next.error.is_none());
        assert!(next.is_authenticated);
        assert_eq!(next.user, Some(user()));
    }

    #[test]
    fn success_authenticates() {
        let next = authenticated();
        assert_eq!(next.status(), AuthStatus::Authenticated);
        assert_eq!(next.user, Some(user()));
        assert!(next.is_consistent());
    }

    #[test]
    fn error_drops_user_and_records_message() {
        let next = AuthStateMachine::reduce(
            authenticated(),
            AuthAction::Error {
                message: "nope".into(),
            },
        );
        assert_eq!(next.status(), AuthStatus::Errored);
        assert!(!next.is_authenticated);
        assert!(next.user.is_none());
        assert_eq!(next.error.as_deref(), Some("nope"));
    }

    #[test]
    fn logout_resets_everything() {
        let next = AuthStateMachine::reduce(authenticated(), AuthAction::Logout);
        assert_eq!(
            next,
            AuthSession {
                is_authenticated: false,
                is_loading: false,
                user: None,
                error: None,
            }
        );
    }

    #[test]
    fn restore_with_user_authenticates() {
        let next = AuthStateMachine::reduce(
            AuthSession::default(),
            AuthAction::Restore { user: Some(user()) },
        );
        assert!(next.is_authenticated);
        assert!(!next.is_loading);
        assert!(next.is_consistent());
    }

    #[test]
    fn restore_without_user_is_unauthenticated() {
        let next = AuthStateMachine::reduce(AuthSession::default(), AuthAction::Restore { user: None });
        assert_eq!(next.status(), AuthStatus::Unauthenticated);
        assert!(next.is_consistent());
    }

    #[test]
    fn every_settled_transition_is_consistent() {
        let actions = [
            AuthAction::Success { user: user() },
            AuthAction::Error {
                message: "x".into(),
            },
            AuthAction::Logout,
            AuthAction::Restore { user: None },
            AuthAction::Restore { user: Some(user()) },
        ];
        for action in actions {
            for start in [AuthSession::default(), authenticated()] {
                let next = AuthStateMachine::reduce(start, action.clone());
                assert!(next.is_consistent(), "{} left session inconsistent", action.name());
            }
        }
    }
}
