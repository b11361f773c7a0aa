use serde::Serialize;
use serde_json::{json, Value};

use super::{format_price, View};
use crate::models::{Booking, Venue, VenueType};

/// One venue in a result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueCard {
    pub id: String,
    pub name: String,
    pub venue_type: VenueType,
    pub address: String,
    pub capacity: u32,
    pub space_sqft: Option<f64>,
    pub amenities: Vec<&'static str>,
    pub picture: Option<String>,
    pub date: Option<String>,
    pub price: Option<f64>,
    #[serde(skip)]
    currency: String,
}

impl VenueCard {
    /// `date` is the selected search date; the card shows that date's
    /// override price when the venue has one
    pub fn new(venue: &Venue, date: Option<&str>, currency: &str) -> Self {
        Self {
            id: venue.id.clone(),
            name: venue.venue_name.clone(),
            venue_type: venue.venue_type,
            address: venue.address.clone(),
            capacity: venue.capacity,
            space_sqft: venue.space_sqft,
            amenities: venue.amenities.labels(),
            picture: venue.pictures.first().cloned(),
            date: date.map(str::to_string),
            price: date.and_then(|d| venue.override_price(d)),
            currency: currency.to_string(),
        }
    }

    pub fn price_label(&self) -> Option<String> {
        self.price.map(|p| format_price(p, &self.currency))
    }
}

impl View for VenueCard {
    fn render_text(&self) -> String {
        let mut out = vec![format!("{}  [{}]", self.name, self.venue_type)];
        if let (Some(price), Some(date)) = (self.price_label(), &self.date) {
            out.push(format!("  {} on {}", price, date));
        }
        if !self.address.is_empty() {
            out.push(format!("  {}", self.address));
        }

        let mut facts = vec![format!("Capacity: {} guests", self.capacity)];
        if let Some(space) = self.space_sqft {
            facts.push(format!("{} sq ft", space));
        }
        out.push(format!("  {}", facts.join("  |  ")));

        if !self.amenities.is_empty() {
            out.push(format!("  Amenities: {}", self.amenities.join(", ")));
        }
        if let Some(picture) = &self.picture {
            out.push(format!("  Picture: {}", picture));
        }
        out.push(format!("  id: {}", self.id));
        out.join("\n")
    }

    fn to_json(&self) -> Value {
        let mut value = json!(self);
        value["price_label"] = json!(self.price_label());
        value
    }
}

/// A titled list of bookings (`/bookings`, owner requests)
#[derive(Debug, Clone, PartialEq)]
pub struct BookingListing {
    pub title: String,
    pub bookings: Vec<Booking>,
    currency: String,
}

impl BookingListing {
    pub fn new(title: impl Into<String>, bookings: Vec<Booking>, currency: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bookings,
            currency: currency.into(),
        }
    }
}

impl View for BookingListing {
    fn render_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        if self.bookings.is_empty() {
            out.push("No bookings yet.".to_string());
            return out.join("\n");
        }

        for b in &self.bookings {
            let guests = b.guests.map(|g| format!("{} guests", g)).unwrap_or_else(|| "-".to_string());
            let price = b
                .price
                .map(|p| format_price(p, &self.currency))
                .unwrap_or_else(|| "-".to_string());
            out.push(format!(
                "  {}  {:<10} {:<12} {:<16} venue {}  ({})",
                b.date, b.status.as_str(), guests, price, b.venue_id, b.id
            ));
        }
        out.join("\n")
    }

    fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "count": self.bookings.len(),
            "bookings": self.bookings,
        })
    }
}
