//! Restaurant catalogue types as served by the listing API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relation;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Postal address attached to a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
}

/// Aggregated review data for a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub review_count: i64,
    #[serde(default)]
    pub top_tags: Vec<String>,
}

/// A restaurant record.
///
/// The `address` and `summary` fields accept every join shape the data
/// layer can produce for a to-one relation (plain object, one-element
/// array, empty array, `[null]`, `null`, absent key) and always come out
/// as an object or `None`. On the wire they serialize as an object or
/// `null` with the key always present. `distance` is the opposite: it is
/// attached only when the request carried a location, and the key is
/// omitted entirely otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub location: Option<Coordinate>,
    pub phone_number: Option<String>,
    pub google_maps_place_id: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "relation::deserialize_to_one")]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "relation::deserialize_to_one")]
    pub summary: Option<ReviewSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}
