//! Route table and guarded navigation

pub mod guard;

use serde::{Serialize, Serializer};
use std::fmt;

pub use guard::{guard, GuardDecision};

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    Search,
    Bookings,
    OwnerVenues,
}

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Authenticated,
    Owner,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Login,
        Route::Signup,
        Route::Search,
        Route::Bookings,
        Route::OwnerVenues,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Search => "/search",
            Route::Bookings => "/bookings",
            Route::OwnerVenues => "/owner/venues",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Search => "Search Venues",
            Route::Bookings => "My Bookings",
            Route::OwnerVenues => "My Venues",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Bookings => Access::Authenticated,
            Route::OwnerVenues => Access::Owner,
            _ => Access::Public,
        }
    }

    /// Resolve a path; anything unknown falls back to home
    pub fn resolve(path: &str) -> Route {
        let path = path.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        let path = path.strip_prefix('/').unwrap_or(path);

        Route::ALL
            .into_iter()
            .find(|r| r.path().trim_start_matches('/') == path)
            .unwrap_or(Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

/// Result of navigating to a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "navigation", rename_all = "lowercase")]
pub enum Navigation {
    Render { route: Route, query: Option<String> },
    Redirect { from: Route, to: Route },
    Loading { route: Route },
}

/// Split a location into route and query string and apply the guard
pub fn navigate(session: &Session, location: &str) -> Navigation {
    let (path, query) = match location.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string()).filter(|q| !q.is_empty())),
        None => (location, None),
    };
    let route = Route::resolve(path);

    let decision = match route.access() {
        Access::Public => GuardDecision::Allow,
        Access::Authenticated => guard(session, false),
        Access::Owner => guard(session, true),
    };

    match decision {
        GuardDecision::Allow => Navigation::Render { route, query },
        GuardDecision::Loading => Navigation::Loading { route },
        GuardDecision::Redirect(to) => {
            tracing::debug!(from = %route, to = %to, "navigation redirected by guard");
            Navigation::Redirect { from: route, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    fn member() -> Session {
        Session::authenticated(
            "t1".into(),
            Profile {
                id: "u1".into(),
                email: "a@b.com".into(),
                display_name: "A".into(),
                contact_number: String::new(),
                owner: false,
                role: "user".into(),
                auth_provider: "password".into(),
            },
        )
    }

    #[test]
    fn resolve_matches_known_paths_and_falls_back_home() {
        assert_eq!(Route::resolve("/search"), Route::Search);
        assert_eq!(Route::resolve("owner/venues/"), Route::OwnerVenues);
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve("/owner/venues/new"), Route::Home);
        assert_eq!(Route::resolve("/nowhere"), Route::Home);
    }

    #[test]
    fn public_routes_render_for_anyone_and_keep_query() {
        let nav = navigate(&Session::anonymous(), "/search?type=Hall&capacity_min=100");
        assert_eq!(
            nav,
            Navigation::Render {
                route: Route::Search,
                query: Some("type=Hall&capacity_min=100".into())
            }
        );
    }

    #[test]
    fn guarded_routes_redirect_anonymous_users_to_login() {
        assert_eq!(
            navigate(&Session::anonymous(), "/bookings"),
            Navigation::Redirect { from: Route::Bookings, to: Route::Login }
        );
    }

    #[test]
    fn owner_route_sends_regular_users_home() {
        assert_eq!(
            navigate(&member(), "/owner/venues"),
            Navigation::Redirect { from: Route::OwnerVenues, to: Route::Home }
        );
        assert_eq!(
            navigate(&member(), "/bookings"),
            Navigation::Render { route: Route::Bookings, query: None }
        );
    }

    #[test]
    fn booting_session_waits_on_guarded_routes_only() {
        let booting = Session::booting(None);
        assert_eq!(navigate(&booting, "/bookings"), Navigation::Loading { route: Route::Bookings });
        assert_eq!(navigate(&booting, "/"), Navigation::Render { route: Route::Home, query: None });
    }
}
