use url::form_urlencoded;

use super::client::{endpoint, GatewayClient};
use super::format::ApiResult;
use crate::models::venue::{RegisteredVenue, VenueEnvelope, VenueList};
use crate::models::{Availability, SearchFilter, Venue, VenueDraft, VenuePatch};

impl GatewayClient {
    pub async fn register_venue(&self, draft: &VenueDraft) -> ApiResult<RegisteredVenue> {
        self.post("/venues/register", draft).await
    }

    pub async fn update_venue(&self, venue_id: &str, patch: &VenuePatch) -> ApiResult<Venue> {
        let path = endpoint(&["venues", venue_id]);
        self.patch::<VenueEnvelope, _>(&path, patch)
            .await
            .map(|envelope| envelope.venue)
    }

    /// Search with the filter's present fields as query parameters
    pub async fn search_venues(&self, filter: &SearchFilter) -> ApiResult<Vec<Venue>> {
        let query = filter.to_query();
        let path = if query.is_empty() {
            "/venues/search".to_string()
        } else {
            format!("/venues/search?{}", query)
        };

        self.get::<VenueList>(&path).await.map(|list| list.venues)
    }

    pub async fn venue_availability(&self, venue_id: &str, date: &str) -> ApiResult<Availability> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("date", date)
            .finish();
        let path = format!("{}?{}", endpoint(&["venues", venue_id, "availability"]), query);
        self.get(&path).await
    }
}
