use serde::{Deserialize, Serialize};
use std::fmt;

/// Status the game reports for an owned aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftStatus {
    Parked,
    Pending,
    Grounded,
    Maintenance,
    Routed,
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AircraftStatus::Parked => "parked",
            AircraftStatus::Pending => "pending",
            AircraftStatus::Grounded => "grounded",
            AircraftStatus::Maintenance => "maintenance",
            AircraftStatus::Routed => "routed",
        };
        f.write_str(label)
    }
}

/// Three-class cabin layout in seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerSplit {
    pub economy: u32,
    pub business: u32,
    pub first: u32,
}

impl PassengerSplit {
    pub fn total(&self) -> u32 {
        self.economy + self.business + self.first
    }
}

/// Hold layout for freighters, as aft/forward percentages sent with the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoSplit {
    pub aft: u32,
    pub forward: u32,
}

impl CargoSplit {
    /// The game reads `aft = forward = 0` as "whole hold to large cargo".
    pub const FULL_LARGE: CargoSplit = CargoSplit { aft: 0, forward: 0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SeatConfig {
    Passenger(PassengerSplit),
    Cargo(CargoSplit),
}

impl fmt::Display for SeatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatConfig::Passenger(split) => {
                write!(f, "Y{}/J{}/F{}", split.economy, split.business, split.first)
            }
            SeatConfig::Cargo(split) if *split == CargoSplit::FULL_LARGE => f.write_str("L100%"),
            SeatConfig::Cargo(split) => write!(f, "aft {}%/fwd {}%", split.aft, split.forward),
        }
    }
}

/// One owned aircraft as seen in a fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetAircraft {
    pub id: u64,
    pub model_id: u32,
    /// Registration name, `ORIGIN-DEST` optionally followed by a suffix.
    pub name: String,
    pub status: AircraftStatus,
    #[serde(default)]
    pub seat_config: Option<SeatConfig>,
    /// Flight hours left before the next A-check.
    pub hours_to_check: u32,
    /// Whether the aircraft is currently on the ground at its home base.
    #[serde(default)]
    pub at_base: bool,
}

impl FleetAircraft {
    pub fn route_pair(&self) -> Option<(&str, &str)> {
        parse_route_name(&self.name)
    }
}

/// Split an aircraft name like `FRA-LAX` or `FRA-LAX-2` into its origin and destination.
pub fn parse_route_name(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.trim().split('-');
    let origin = parts.next()?.trim();
    let destination = parts.next()?.trim();
    if origin.is_empty() || destination.is_empty() {
        return None;
    }
    Some((origin, destination))
}

pub fn route_key(origin: &str, destination: &str) -> String {
    format!("{}-{}", origin, destination)
}
