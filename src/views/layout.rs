use serde::Serialize;
use serde_json::{json, Value};

use super::View;
use crate::router::Route;
use crate::session::{Session, SessionStatus};

pub const BRAND: &str = "HallsBooking";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBadge {
    pub label: String,
    pub owner: bool,
}

/// Navigation bar derived from the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub status: SessionStatus,
    pub nav: Vec<NavItem>,
    pub user: Option<UserBadge>,
}

impl Layout {
    pub fn from_session(session: &Session) -> Self {
        let mut nav = vec![NavItem { label: "Search Venues", route: Route::Search }];
        if session.is_owner() {
            nav.push(NavItem { label: "My Venues", route: Route::OwnerVenues });
        }
        nav.push(NavItem { label: "My Bookings", route: Route::Bookings });

        let user = session.profile().map(|p| UserBadge {
            label: p.label().to_string(),
            owner: p.owner,
        });

        Self {
            status: session.status(),
            nav,
            user,
        }
    }
}

impl View for Layout {
    fn render_text(&self) -> String {
        let links: Vec<&str> = self.nav.iter().map(|n| n.label).collect();
        let account = match (&self.user, self.status) {
            (_, SessionStatus::Booting) => "Loading...".to_string(),
            (Some(user), _) if user.owner => format!("{} [Owner] | Logout", user.label),
            (Some(user), _) => format!("{} | Logout", user.label),
            (None, _) => "Login | Sign Up".to_string(),
        };
        format!("{}  ::  {}  ::  {}", BRAND, links.join("  "), account)
    }

    fn to_json(&self) -> Value {
        json!({
            "brand": BRAND,
            "session": self.status,
            "nav": self.nav,
            "user": self.user,
        })
    }
}
