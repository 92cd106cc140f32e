use serde::{Deserialize, Serialize};

use super::aircraft::FleetKind;
use super::fleet::SeatConfig;

/// Daily demand per cabin class (passengers) or per load type (cargo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassDemand {
    Passenger { first: u32, business: u32, economy: u32 },
    Cargo { large: u32, heavy: u32 },
}

impl ClassDemand {
    pub fn fleet_kind(&self) -> FleetKind {
        match self {
            ClassDemand::Passenger { .. } => FleetKind::Passenger,
            ClassDemand::Cargo { .. } => FleetKind::Cargo,
        }
    }

    pub fn value(&self, class: SortClass) -> u32 {
        match (self, class) {
            (ClassDemand::Passenger { first, .. }, SortClass::First) => *first,
            (ClassDemand::Passenger { business, .. }, SortClass::Business) => *business,
            (ClassDemand::Passenger { economy, .. }, SortClass::Economy) => *economy,
            (ClassDemand::Cargo { large, .. }, SortClass::Large) => *large,
            (ClassDemand::Cargo { heavy, .. }, SortClass::Heavy) => *heavy,
            _ => 0,
        }
    }
}

/// Class a candidate feed is ranked by, highest demand first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortClass {
    First,
    Business,
    Economy,
    Large,
    Heavy,
}

impl SortClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortClass::First => "first",
            SortClass::Business => "business",
            SortClass::Economy => "economy",
            SortClass::Large => "large",
            SortClass::Heavy => "heavy",
        }
    }

    pub fn fleet_kind(&self) -> FleetKind {
        match self {
            SortClass::First | SortClass::Business | SortClass::Economy => FleetKind::Passenger,
            SortClass::Large | SortClass::Heavy => FleetKind::Cargo,
        }
    }
}

/// A destination offered by the demand feed, not yet operated by the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    pub origin: String,
    pub destination: String,
    /// Great-circle distance in km.
    pub distance: f64,
    pub demand: ClassDemand,
}

/// One page of the ranked candidate feed.
#[derive(Debug, Clone, Default)]
pub struct RoutePage {
    pub routes: Vec<CandidateRoute>,
    pub has_more: bool,
}

/// Ticket prices for one route, in the game's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TicketPrices {
    Passenger { economy: u32, business: u32, first: u32 },
    Cargo { large: u32, heavy: u32 },
}

/// Point-to-point demand and recommended pricing for a specific pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTicketDetail {
    pub distance: f64,
    pub demand: ClassDemand,
    pub pricing: TicketPrices,
}

/// A route accepted by discovery, with the split the new aircraft should be ordered with.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAllocation {
    /// `ORIGIN-DEST`, also used as the aircraft name.
    pub route_name: String,
    pub destination: String,
    pub distance: f64,
    pub split: SeatConfig,
    pub trips_per_day: u32,
}

/// An operated route as listed on the game's route screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteListing {
    pub route_id: u64,
    pub origin: String,
    pub destination: String,
    pub kind: FleetKind,
}
