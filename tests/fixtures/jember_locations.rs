//! Distribution points around Jember, East Java.
//!
//! The first four are the seed data of the tobacco distribution network;
//! the rest are approximate town centres nearby.

use route_planner::network::Network;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

pub const SEED_NODES: &[Location] = &[
    Location::new("Wuluhan", -8.2289, 113.4864),
    Location::new("Ambulu", -8.3447, 113.6067),
    Location::new("Balung", -8.2611, 113.5239),
    Location::new("Gudang_Pusat", -8.1721, 113.7007),
];

pub const NEARBY_TOWNS: &[Location] = &[
    Location::new("Puger", -8.3773, 113.4741),
    Location::new("Kencong", -8.2833, 113.3667),
    Location::new("Rambipuji", -8.2066, 113.6066),
    Location::new("Jenggawah", -8.2640, 113.6520),
    Location::new("Mumbulsari", -8.2520, 113.7380),
];

pub fn network_from(locations: &[Location]) -> Network {
    locations
        .iter()
        .fold(Network::new(), |network, loc| {
            let (lat, lon) = loc.coords();
            network.node(loc.name, lat, lon)
        })
}

pub fn seed_network() -> Network {
    network_from(SEED_NODES)
}

pub fn full_network() -> Network {
    let all: Vec<Location> = SEED_NODES.iter().chain(NEARBY_TOWNS).cloned().collect();
    network_from(&all)
}
