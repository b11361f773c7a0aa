use serde_json::{json, Value};

use super::listing::VenueCard;
use super::View;
use crate::api::format::REQUEST_FAILED;
use crate::api::{ApiResult, VenueGateway};
use crate::models::{SearchFilter, Venue};
use crate::types::{RequestState, Ticket, Tracked};

pub const NO_RESULTS: &str = "No venues found matching your criteria.";
pub const SEARCH_FAILED: &str = "Failed to search venues";

/// What the search screen currently shows
#[derive(Debug, PartialEq)]
pub enum SearchOutcome<'a> {
    Idle,
    Loading,
    Failed(&'a str),
    Empty,
    Found(&'a [Venue]),
}

/// Search screen state: the filter, the navigation query string and the
/// result of the most recently resolved search
#[derive(Debug, Clone)]
pub struct SearchView {
    filter: SearchFilter,
    location: String,
    results: Tracked<Vec<Venue>>,
    currency: String,
}

impl SearchView {
    /// Build the view from the query string it was navigated to with
    pub fn from_query(query: &str, currency: impl Into<String>) -> Self {
        let filter = SearchFilter::from_query(query);
        let location = filter.to_query();
        Self {
            filter,
            location,
            results: Tracked::new(),
            currency: currency.into(),
        }
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Edits are local until `submit`
    pub fn filter_mut(&mut self) -> &mut SearchFilter {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: SearchFilter) {
        self.filter = filter;
    }

    /// Current navigation location, e.g. `/search?type=Hall`
    pub fn location(&self) -> String {
        if self.location.is_empty() {
            "/search".to_string()
        } else {
            format!("/search?{}", self.location)
        }
    }

    pub fn results(&self) -> &Tracked<Vec<Venue>> {
        &self.results
    }

    pub fn begin_search(&mut self) -> Ticket {
        self.results.begin()
    }

    /// Returns true if the applied result was already superseded
    pub fn finish_search(&mut self, ticket: Ticket, mut result: ApiResult<Vec<Venue>>) -> bool {
        if !result.ok && result.error_message() == REQUEST_FAILED {
            result.error = Some(SEARCH_FAILED.to_string());
        }
        self.results.resolve(ticket, result)
    }

    /// Run the search for the current filter without touching the location
    pub async fn load(&mut self, gateway: &dyn VenueGateway) {
        let ticket = self.begin_search();
        let filter = self.filter.clone();
        let result = gateway.search(&filter).await;
        self.finish_search(ticket, result);
    }

    /// Explicit submit: sync the location with the filter, then search
    pub async fn submit(&mut self, gateway: &dyn VenueGateway) {
        self.location = self.filter.to_query();
        tracing::debug!(location = %self.location(), "search submitted");
        self.load(gateway).await;
    }

    /// Reset filter and location, then search unfiltered
    pub async fn clear(&mut self, gateway: &dyn VenueGateway) {
        self.filter.clear();
        self.location.clear();
        self.load(gateway).await;
    }

    /// Loading for as long as any search is in flight
    pub fn outcome(&self) -> SearchOutcome<'_> {
        if self.results.is_loading() {
            return SearchOutcome::Loading;
        }
        match self.results.state() {
            RequestState::Idle => SearchOutcome::Idle,
            RequestState::Pending => SearchOutcome::Loading,
            RequestState::Failed(message) => SearchOutcome::Failed(message),
            RequestState::Succeeded(venues) if venues.is_empty() => SearchOutcome::Empty,
            RequestState::Succeeded(venues) => SearchOutcome::Found(venues),
        }
    }

    /// Override price for the filter's date, if the venue has one
    pub fn effective_price(&self, venue: &Venue) -> Option<f64> {
        self.filter.date.as_deref().and_then(|date| venue.override_price(date))
    }

    fn cards(&self, venues: &[Venue]) -> Vec<VenueCard> {
        venues
            .iter()
            .map(|v| VenueCard::new(v, self.filter.date.as_deref(), &self.currency))
            .collect()
    }
}

impl View for SearchView {
    fn render_text(&self) -> String {
        let mut out = vec!["Search Venues".to_string()];
        if !self.filter.is_empty() {
            out.push(format!("Filters: {}", self.filter.to_query()));
        }
        out.push(String::new());

        match self.outcome() {
            SearchOutcome::Idle => out.push("Submit a search to see venues.".to_string()),
            SearchOutcome::Loading => out.push("Loading...".to_string()),
            SearchOutcome::Failed(message) => out.push(format!("Error: {}", message)),
            SearchOutcome::Empty => out.push(NO_RESULTS.to_string()),
            SearchOutcome::Found(venues) => {
                let noun = if venues.len() == 1 { "venue" } else { "venues" };
                out.push(format!("{} {} found", venues.len(), noun));
                for card in self.cards(venues) {
                    out.push(String::new());
                    out.push(card.render_text());
                }
            }
        }

        out.join("\n")
    }

    fn to_json(&self) -> Value {
        let (state, body) = match self.outcome() {
            SearchOutcome::Idle => ("idle", Value::Null),
            SearchOutcome::Loading => ("loading", Value::Null),
            SearchOutcome::Failed(message) => ("failed", json!({ "error": message })),
            SearchOutcome::Empty => ("empty", json!({ "message": NO_RESULTS, "venues": [] })),
            SearchOutcome::Found(venues) => {
                let cards: Vec<Value> = self.cards(venues).iter().map(View::to_json).collect();
                ("found", json!({ "count": venues.len(), "venues": cards }))
            }
        };

        json!({
            "location": self.location(),
            "filter": self.filter,
            "state": state,
            "result": body,
        })
    }
}
