// Cabin and hold layouts fitted to per-class demand
use crate::config::DiscoveryConfig;
use crate::models::{CargoSplit, PassengerSplit};

/// Per-trip demand after the safety margin and low-frequency buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaledDemand {
    pub first: u32,
    pub business: u32,
    pub economy: u32,
}

/// Fit scaled demand into `total_capacity` seats.
///
/// First class is served first, then business, and economy takes whatever is left, so
/// economy demand never changes the result. The split always sums to at most
/// `total_capacity`.
pub fn configure(demand: ScaledDemand, total_capacity: u32) -> PassengerSplit {
    if demand.first >= total_capacity {
        return PassengerSplit {
            economy: 0,
            business: 0,
            first: total_capacity,
        };
    }

    if demand.first.saturating_add(demand.business) >= total_capacity {
        return PassengerSplit {
            economy: 0,
            business: total_capacity - demand.first,
            first: demand.first,
        };
    }

    PassengerSplit {
        economy: total_capacity - demand.first - demand.business,
        business: demand.business,
        first: demand.first,
    }
}

/// `ceil(route_demand / trips_per_day * margin)`, plus the buffer on low-frequency routes.
pub fn scale_class_demand(route_demand: u32, trips_per_day: u32, config: &DiscoveryConfig) -> u32 {
    if trips_per_day == 0 {
        return 0;
    }

    let per_trip = (route_demand as f64 / trips_per_day as f64 * config.demand_safety_margin).ceil();
    let buffer = if trips_per_day <= config.low_frequency_trips {
        config.low_frequency_buffer
    } else {
        0
    };
    (per_trip.min(u32::MAX as f64) as u32).saturating_add(buffer)
}

pub fn scale_demand(first: u32, business: u32, economy: u32, trips_per_day: u32, config: &DiscoveryConfig) -> ScaledDemand {
    ScaledDemand {
        first: scale_class_demand(first, trips_per_day, config),
        business: scale_class_demand(business, trips_per_day, config),
        economy: scale_class_demand(economy, trips_per_day, config),
    }
}

/// Seat layout for a route with the given daily class demand.
pub fn passenger_split(
    first: u32,
    business: u32,
    economy: u32,
    trips_per_day: u32,
    capacity: u32,
    config: &DiscoveryConfig,
) -> PassengerSplit {
    configure(scale_demand(first, business, economy, trips_per_day, config), capacity)
}

/// Outcome of fitting a freighter hold to large/heavy demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoFit {
    Split(CargoSplit),
    /// Large demand does not fill the hold on its own. The aft/forward ratio formula for
    /// this case has never been activated, so no split is produced.
    HeavySplitUnsupported,
}

/// Hold layout for a route with the given daily large-cargo demand.
pub fn cargo_split(large: u32, trips_per_day: u32, capacity: u32, config: &DiscoveryConfig) -> CargoFit {
    if trips_per_day == 0 {
        return CargoFit::HeavySplitUnsupported;
    }

    let large_yield = large as f64 * config.cargo_yield_factor;
    if large_yield / trips_per_day as f64 > capacity as f64 * config.cargo_volume_ratio {
        CargoFit::Split(CargoSplit::FULL_LARGE)
    } else {
        CargoFit::HeavySplitUnsupported
    }
}
