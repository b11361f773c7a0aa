use serde_json::{json, Value};

use super::View;
use crate::models::VenueType;
use crate::session::Session;

const FEATURES: [(&str, &str); 4] = [
    ("Easy Search", "Find the perfect venue with our advanced search filters"),
    ("Real-time Availability", "Check availability and book instantly"),
    ("Capacity Management", "Filter venues by guest capacity"),
    ("Location-based", "Find venues near your preferred location"),
];

/// Landing screen
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub signed_in: bool,
    pub owner: bool,
}

impl HomeView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            signed_in: session.is_authenticated(),
            owner: session.is_owner(),
        }
    }

    /// Search shortcut for each venue type
    pub fn shortcuts() -> Vec<(VenueType, String)> {
        VenueType::ALL
            .into_iter()
            .map(|t| (t, format!("/search?type={}", t)))
            .collect()
    }
}

impl View for HomeView {
    fn render_text(&self) -> String {
        let mut out = vec![
            "Find Your Perfect Venue".to_string(),
            "Discover and book venues for your events, from elegant halls to spacious lawns.".to_string(),
            String::new(),
            "  Search Venues      halls open /search".to_string(),
        ];
        if self.owner {
            out.push("  List Your Venue    halls venues register --help".to_string());
        }

        out.push(String::new());
        for (title, description) in FEATURES {
            out.push(format!("  * {}: {}", title, description));
        }

        out.push(String::new());
        out.push("Browse by type:".to_string());
        for (venue_type, location) in Self::shortcuts() {
            out.push(format!("  {:<12} halls open '{}'", venue_type.as_str(), location));
        }

        if !self.signed_in {
            out.push(String::new());
            out.push("Join thousands of users who trust us with their events.".to_string());
            out.push("  halls auth signup    |    halls auth login".to_string());
        }

        out.join("\n")
    }

    fn to_json(&self) -> Value {
        let shortcuts: Vec<Value> = Self::shortcuts()
            .into_iter()
            .map(|(t, location)| json!({ "type": t, "location": location }))
            .collect();
        let features: Vec<Value> = FEATURES
            .iter()
            .map(|(title, description)| json!({ "title": title, "description": description }))
            .collect();

        json!({
            "signed_in": self.signed_in,
            "owner": self.owner,
            "features": features,
            "shortcuts": shortcuts,
        })
    }
}
