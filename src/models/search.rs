use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::venue::VenueType;

/// Transient search criteria owned by the search view
///
/// Malformed input is never an error: a value that does not parse is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<VenueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_km: Option<f64>,
}

impl SearchFilter {
    /// Read a filter from a navigation query string (`?type=Hall&capacity_min=100`)
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut filter = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            filter.set(&key, &value);
        }
        filter
    }

    /// Set one field from raw user input; unknown keys are ignored
    pub fn set(&mut self, key: &str, raw: &str) {
        let raw = raw.trim();
        match key {
            "type" => self.venue_type = raw.parse().ok(),
            "capacity_min" => self.capacity_min = parse_count(raw),
            "capacity_max" => self.capacity_max = parse_count(raw),
            "date" => self.date = parse_date(raw),
            "price_min" => self.price_min = parse_amount(raw),
            "price_max" => self.price_max = parse_amount(raw),
            "near_lat" => self.near_lat = parse_coordinate(raw, 90.0),
            "near_lng" => self.near_lng = parse_coordinate(raw, 180.0),
            "near_km" => self.near_km = parse_amount(raw),
            _ => {}
        }
    }

    /// Query string with only the present fields, without a leading `?`
    pub fn to_query(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(t) = self.venue_type {
            out.append_pair("type", t.as_str());
        }
        if let Some(v) = self.capacity_min {
            out.append_pair("capacity_min", &v.to_string());
        }
        if let Some(v) = self.capacity_max {
            out.append_pair("capacity_max", &v.to_string());
        }
        if let Some(v) = &self.date {
            out.append_pair("date", v);
        }
        if let Some(v) = self.price_min {
            out.append_pair("price_min", &v.to_string());
        }
        if let Some(v) = self.price_max {
            out.append_pair("price_max", &v.to_string());
        }
        // The API only applies the geo filter when all three are present
        if let (Some(lat), Some(lng), Some(km)) = (self.near_lat, self.near_lng, self.near_km) {
            out.append_pair("near_lat", &lat.to_string());
            out.append_pair("near_lng", &lng.to_string());
            out.append_pair("near_km", &km.to_string());
        }
        out.finish()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_coordinate(raw: &str, bound: f64) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && v.abs() <= bound)
}

fn parse_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}
