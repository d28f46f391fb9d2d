//! Great-circle distance between restaurant coordinates.

use crate::restaurant::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MILES_PER_KM: f64 = 0.621_371;

/// Unit reported distances are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Parse a configuration value. Unrecognized values fall back to kilometers.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "mi" | "miles" => Self::Miles,
            _ => Self::Kilometers,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceUnit::Kilometers => write!(f, "km"),
            DistanceUnit::Miles => write!(f, "mi"),
        }
    }
}

/// Haversine distance between two points in kilometers, on a spherical Earth.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lng = (d_lng / 2.0).sin();

    let h = sin_lat * sin_lat + lat_a.cos() * lat_b.cos() * sin_lng * sin_lng;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Distance between two points in the requested unit.
#[must_use]
pub fn distance_in(a: Coordinate, b: Coordinate, unit: DistanceUnit) -> f64 {
    let km = haversine_km(a, b);
    match unit {
        DistanceUnit::Kilometers => km,
        DistanceUnit::Miles => km * MILES_PER_KM,
    }
}
