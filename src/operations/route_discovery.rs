// Route discovery over the ranked candidate feed
use std::collections::{BTreeMap, HashSet};

use crate::client::RouteDemandSource;
use crate::config::DiscoveryConfig;
use crate::models::*;
use crate::operations::seat_config::{self, CargoFit};
use crate::{o_debug, o_error, o_info, o_trace};

/// Round trips an aircraft flies per day on a route of `distance` km.
///
/// `ceil(hours_per_day / (distance / (speed * speed_margin)))`. Returns 0 for a route or
/// airframe that cannot be flown.
pub fn trips_per_day(distance: f64, speed: f64, hours_per_day: f64, speed_margin: f64) -> u32 {
    if !(distance > 0.0) || !(speed > 0.0) || !(speed_margin > 0.0) {
        return 0;
    }
    let flight_hours = distance / (speed * speed_margin);
    let trips = (hours_per_day / flight_hours).ceil();
    if !trips.is_finite() || trips <= 0.0 {
        return 0;
    }
    trips.min(u32::MAX as f64) as u32
}

/// Destinations already connected to `hub_iata`, in either direction, from aircraft names.
pub fn existing_destinations<'n, I>(route_names: I, hub_iata: &str) -> HashSet<String>
where
    I: IntoIterator<Item = &'n str>,
{
    let mut destinations = HashSet::new();
    for name in route_names {
        let Some((origin, destination)) = parse_route_name(name) else {
            continue;
        };
        if origin.eq_ignore_ascii_case(hub_iata) {
            destinations.insert(destination.to_ascii_uppercase());
        } else if destination.eq_ignore_ascii_case(hub_iata) {
            destinations.insert(origin.to_ascii_uppercase());
        }
    }
    destinations
}

/// Aircraft per destination for each hub, keyed by hub IATA.
pub fn hub_route_counts(fleet: &[FleetAircraft], hubs: &[Hub]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for aircraft in fleet {
        let Some((origin, destination)) = aircraft.route_pair() else {
            continue;
        };
        for hub in hubs {
            let other = if origin.eq_ignore_ascii_case(&hub.iata) {
                destination
            } else if destination.eq_ignore_ascii_case(&hub.iata) {
                origin
            } else {
                continue;
            };
            *counts
                .entry(hub.iata.clone())
                .or_default()
                .entry(other.to_ascii_uppercase())
                .or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipCause {
    AlreadyServed,
    WrongDemandKind,
    BadDistance,
    OutOfRange,
    UnknownAirport,
    RunwayTooShort { required: u32, available: u32 },
    InsufficientDemand,
    PremiumDemandTooLow,
    HeavySplitUnsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateVerdict {
    Accept(RouteAllocation),
    Skip(SkipCause),
    /// Ranked demand fell below the floor; every later candidate is worse.
    StopHub,
}

pub struct RouteDiscovery<'a> {
    source: &'a dyn RouteDemandSource,
    reference: &'a ReferenceData,
    config: &'a DiscoveryConfig,
}

impl<'a> RouteDiscovery<'a> {
    pub fn new(source: &'a dyn RouteDemandSource, reference: &'a ReferenceData, config: &'a DiscoveryConfig) -> Self {
        Self { source, reference, config }
    }

    /// Apply every eligibility filter to one candidate, in order.
    pub fn evaluate(
        &self,
        model: &AircraftModel,
        origin: &Hub,
        candidate: &CandidateRoute,
        existing: &HashSet<String>,
    ) -> CandidateVerdict {
        let destination = candidate.destination.to_ascii_uppercase();
        if existing.contains(&destination) || destination.eq_ignore_ascii_case(&origin.iata) {
            return CandidateVerdict::Skip(SkipCause::AlreadyServed);
        }
        if candidate.demand.fleet_kind() != model.kind {
            return CandidateVerdict::Skip(SkipCause::WrongDemandKind);
        }
        if !(candidate.distance > 0.0) || !candidate.distance.is_finite() {
            return CandidateVerdict::Skip(SkipCause::BadDistance);
        }
        if candidate.distance > model.range {
            return CandidateVerdict::Skip(SkipCause::OutOfRange);
        }

        let trips = trips_per_day(
            candidate.distance,
            model.speed,
            self.config.hours_per_day(model.kind),
            self.config.speed_margin_factor,
        );
        if trips == 0 {
            return CandidateVerdict::Skip(SkipCause::BadDistance);
        }

        let Some(airport) = self.reference.airport(&destination) else {
            return CandidateVerdict::Skip(SkipCause::UnknownAirport);
        };
        if airport.runway < model.runway {
            return CandidateVerdict::Skip(SkipCause::RunwayTooShort {
                required: model.runway,
                available: airport.runway,
            });
        }

        let capacity = model.capacity as f64;
        let trips_f = trips as f64;
        let tolerance = self.config.tolerance_factor;

        let split = match candidate.demand {
            ClassDemand::Passenger { first, business, economy } => {
                let combined = first as f64 + business as f64 + economy as f64;
                if combined < trips_f * capacity {
                    return CandidateVerdict::Skip(SkipCause::InsufficientDemand);
                }
                if first as f64 <= capacity * self.config.first_class_floor_ratio * trips_f * tolerance {
                    return CandidateVerdict::StopHub;
                }
                if (first as f64 + business as f64)
                    <= capacity * self.config.combined_floor_ratio * trips_f * tolerance
                {
                    return CandidateVerdict::Skip(SkipCause::PremiumDemandTooLow);
                }
                SeatConfig::Passenger(seat_config::passenger_split(
                    first,
                    business,
                    economy,
                    trips,
                    model.capacity,
                    self.config,
                ))
            }
            ClassDemand::Cargo { large, heavy } => {
                let yield_factor = self.config.cargo_yield_factor;
                let volume_ratio = self.config.cargo_volume_ratio;
                let large_yield = large as f64 * yield_factor;
                if large_yield / volume_ratio + heavy as f64 * yield_factor < trips_f * capacity {
                    return CandidateVerdict::Skip(SkipCause::InsufficientDemand);
                }
                if large_yield < capacity * volume_ratio * tolerance * trips_f {
                    return CandidateVerdict::StopHub;
                }
                match seat_config::cargo_split(large, trips, model.capacity, self.config) {
                    CargoFit::Split(split) => SeatConfig::Cargo(split),
                    CargoFit::HeavySplitUnsupported => {
                        return CandidateVerdict::Skip(SkipCause::HeavySplitUnsupported);
                    }
                }
            }
        };

        CandidateVerdict::Accept(RouteAllocation {
            route_name: route_key(&origin.iata.to_ascii_uppercase(), &destination),
            destination,
            distance: candidate.distance,
            split,
            trips_per_day: trips,
        })
    }

    /// Scan the feed for `origin` and return up to `max_results` viable new routes keyed by
    /// `ORIGIN-DEST`. Page and candidate failures are logged and skipped.
    pub async fn discover(
        &self,
        model: &AircraftModel,
        origin: &Hub,
        existing: &HashSet<String>,
        max_results: u32,
    ) -> BTreeMap<String, RouteAllocation> {
        let mut accepted = BTreeMap::new();
        if max_results == 0 {
            return accepted;
        }

        let sort_class = model.kind.sort_class();
        o_debug!("🔎 Scanning {} candidates from {} (up to {})", model.kind, origin.iata, max_results);

        for page in 1..=self.config.page_ceiling {
            let result = match self.source.search_routes(&origin.iata, sort_class, page).await {
                Ok(result) => result,
                Err(e) => {
                    o_error!("⚠️ Feed page {} for {} failed, skipping: {}", page, origin.iata, e);
                    continue;
                }
            };

            for candidate in &result.routes {
                match self.evaluate(model, origin, candidate, existing) {
                    CandidateVerdict::Accept(allocation) => {
                        if accepted.contains_key(&allocation.route_name) {
                            continue;
                        }
                        o_info!(
                            "✅ {} accepted: {:.0} km, {} trips/day, {}",
                            allocation.route_name,
                            allocation.distance,
                            allocation.trips_per_day,
                            allocation.split
                        );
                        accepted.insert(allocation.route_name.clone(), allocation);
                        if accepted.len() >= max_results as usize {
                            return accepted;
                        }
                    }
                    CandidateVerdict::Skip(cause) => {
                        o_trace!("   skip {}-{}: {:?}", origin.iata, candidate.destination, cause);
                    }
                    CandidateVerdict::StopHub => {
                        o_debug!(
                            "🛑 {} demand at {}-{} is below the floor, done with {}",
                            sort_class.as_str(),
                            origin.iata,
                            candidate.destination,
                            origin.iata
                        );
                        return accepted;
                    }
                }
            }

            if !result.has_more {
                return accepted;
            }
        }

        o_info!("⚠️ Page ceiling {} reached for {}", self.config.page_ceiling, origin.iata);
        accepted
    }
}
