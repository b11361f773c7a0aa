use serde::Serialize;

use super::Route;
use crate::session::{Session, SessionStatus};

/// Outcome of guarding one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Session still booting: show a neutral loading indicator, no redirect
    Loading,
    Redirect(Route),
    Allow,
}

/// Decide whether guarded content may render for this session.
///
/// Pure function of the session; consulted on every navigation.
pub fn guard(session: &Session, require_owner: bool) -> GuardDecision {
    match session.status() {
        SessionStatus::Booting => GuardDecision::Loading,
        SessionStatus::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionStatus::Authenticated if require_owner && !session.is_owner() => GuardDecision::Redirect(Route::Home),
        SessionStatus::Authenticated => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    fn user(owner: bool) -> Session {
        Session::authenticated(
            "t1".to_string(),
            Profile {
                id: "u1".into(),
                email: "a@b.com".into(),
                display_name: String::new(),
                contact_number: String::new(),
                owner,
                role: "user".into(),
                auth_provider: "password".into(),
            },
        )
    }

    #[test]
    fn booting_session_shows_loading_without_redirect() {
        let booting = Session::booting(Some("t1".into()));
        assert_eq!(guard(&booting, false), GuardDecision::Loading);
        assert_eq!(guard(&booting, true), GuardDecision::Loading);
    }

    #[test]
    fn anonymous_session_goes_to_login() {
        assert_eq!(guard(&Session::anonymous(), false), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard(&Session::anonymous(), true), GuardDecision::Redirect(Route::Login));
    }

    #[test]
    fn authenticated_non_owner_is_sent_home_from_owner_routes() {
        // First attempt while anonymous, then again after logging in without the flag
        assert_eq!(guard(&Session::anonymous(), true), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard(&user(false), true), GuardDecision::Redirect(Route::Home));
        assert_eq!(guard(&user(false), false), GuardDecision::Allow);
    }

    #[test]
    fn owner_passes_every_guard() {
        assert_eq!(guard(&user(true), true), GuardDecision::Allow);
        assert_eq!(guard(&user(true), false), GuardDecision::Allow);
    }
}
