//! Great-circle distance between geographic coordinates.
//!
//! Used to derive edge weights when a network supplies only node
//! coordinates.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometers, rounded to 2 decimals.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        great_circle_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance between two points in kilometers, rounded to 2 decimals.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_2(EARTH_RADIUS_KM * c)
}

fn round_2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
