use serde::{Deserialize, Serialize};
use std::fmt;

use super::route::SortClass;

/// Which side of the business an airframe serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetKind {
    Passenger,
    Cargo,
}

impl FleetKind {
    /// Class the demand feed is sorted by when scanning for this kind of route.
    pub fn sort_class(&self) -> SortClass {
        match self {
            FleetKind::Passenger => SortClass::First,
            FleetKind::Cargo => SortClass::Large,
        }
    }

    /// Query value the demand feed uses for this kind.
    pub fn feed_type(&self) -> &'static str {
        match self {
            FleetKind::Passenger => "pax",
            FleetKind::Cargo => "cargo",
        }
    }
}

impl fmt::Display for FleetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetKind::Passenger => f.write_str("passenger"),
            FleetKind::Cargo => f.write_str("cargo"),
        }
    }
}

/// Catalog entry for a purchasable airframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftModel {
    pub id: u32,
    /// Key the configuration refers to, e.g. `a388`.
    pub short_name: String,
    pub display_name: String,
    pub price: i64,
    /// Maximum route distance in km.
    pub range: f64,
    /// Required runway length in ft.
    pub runway: u32,
    /// Seats for passenger airframes, hold units for freighters.
    pub capacity: u32,
    /// Cruise speed in km/h before the engine upgrade margin.
    pub speed: f64,
    pub engine_id: u32,
    pub kind: FleetKind,
}
