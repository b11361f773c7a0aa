use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    Hall,
    Auditorium,
    Banquet,
    Lawn,
}

impl VenueType {
    pub const ALL: [VenueType; 4] = [VenueType::Hall, VenueType::Auditorium, VenueType::Banquet, VenueType::Lawn];

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueType::Hall => "Hall",
            VenueType::Auditorium => "Auditorium",
            VenueType::Banquet => "Banquet",
            VenueType::Lawn => "Lawn",
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VenueType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid venue type '{}'. Must be one of: Hall, Auditorium, Banquet, Lawn.", s))
    }
}

/// GeoJSON point as stored by the API: `coordinates` is `[lng, lat]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverride {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub overrides: Vec<PriceOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenities {
    pub parking_valet: bool,
    pub entry_package: bool,
    pub water: bool,
    pub air_conditioner: bool,
    pub partition_facility: bool,
    pub sound_system: bool,
}

impl Amenities {
    /// Labels of the amenities the venue offers, in display order
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.parking_valet, "Parking Valet"),
            (self.entry_package, "Entry Package"),
            (self.water, "Water"),
            (self.air_conditioner, "Air Conditioner"),
            (self.partition_facility, "Partition Facility"),
            (self.sound_system, "Sound System"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
}

/// Read-only projection of a server-side venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub maps_location: Option<GeoPoint>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub dates_available: Vec<String>,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub space_sqft: Option<f64>,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub additional_description: Option<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

impl Venue {
    /// Date-specific price for `date` (`YYYY-MM-DD`), exact match only
    pub fn override_price(&self, date: &str) -> Option<f64> {
        self.pricing
            .overrides
            .iter()
            .find(|o| o.date == date)
            .map(|o| o.price)
    }
}

/// Latitude/longitude pair as the API accepts it on writes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Body of `POST /venues/register`
#[derive(Debug, Clone, Serialize)]
pub struct VenueDraft {
    pub venue_name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    pub address: String,
    pub maps_location: LatLng,
    pub capacity: u32,
    pub dates_available: Vec<String>,
    pub price_with_dates: Vec<PriceOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<f64>,
    #[serde(flatten)]
    pub amenities: Amenities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_description: Option<String>,
    pub pictures: Vec<String>,
    pub videos: Vec<Video>,
}

/// Body of `PATCH /venues/:id`; only present fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct VenuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<VenueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_location: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_available: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_with_dates: Option<Vec<PriceOverride>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<String>>,
}

impl VenuePatch {
    pub fn is_empty(&self) -> bool {
        self.venue_name.is_none()
            && self.venue_type.is_none()
            && self.address.is_none()
            && self.maps_location.is_none()
            && self.capacity.is_none()
            && self.dates_available.is_none()
            && self.price_with_dates.is_none()
            && self.space.is_none()
            && self.pictures.is_none()
    }
}

/// `data` of `POST /venues/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredVenue {
    pub venue_id: String,
}

/// `data` of `PATCH /venues/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueEnvelope {
    pub venue: Venue,
}

/// `data` of `GET /venues/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueList {
    pub venues: Vec<Venue>,
}

/// `data` of `GET /venues/:id/availability`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub price: Option<f64>,
}
