// Per-aircraft lifecycle: route parked aircraft, send aircraft for A-checks
use crate::client::{GameClient, RouteDemandSource};
use crate::config::{DiscoveryConfig, MaintenanceConfig};
use crate::error::{AutopilotError, Result};
use crate::models::*;
use crate::operations::route_discovery::{hub_route_counts, trips_per_day};
use crate::operations::seat_config::{self, CargoFit};
use crate::{o_debug, o_error, o_info, o_summary, o_trace};

/// The single action the coordinator will take for an aircraft this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// Fit the cabin to the route pair in its name, then open the route.
    Route,
    Check,
    Nothing,
}

/// Decide what to do with one aircraft. A due A-check at base takes precedence over routing.
pub fn plan_action(aircraft: &FleetAircraft, model: &AircraftModel, maintenance: &MaintenanceConfig) -> PlannedAction {
    let check_due = aircraft.hours_to_check < maintenance.check_lead_time_hours
        && aircraft.at_base
        && !maintenance.is_excluded(&model.short_name);
    if check_due {
        return PlannedAction::Check;
    }
    if aircraft.status == AircraftStatus::Parked {
        return PlannedAction::Route;
    }
    PlannedAction::Nothing
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub model: String,
    pub inspected: usize,
    pub routed: usize,
    pub checked: usize,
    pub failed: usize,
}

pub struct FleetLifecycleCoordinator<'a> {
    client: &'a dyn GameClient,
    source: &'a dyn RouteDemandSource,
    reference: &'a ReferenceData,
    discovery: &'a DiscoveryConfig,
    maintenance: &'a MaintenanceConfig,
}

impl<'a> FleetLifecycleCoordinator<'a> {
    pub fn new(
        client: &'a dyn GameClient,
        source: &'a dyn RouteDemandSource,
        reference: &'a ReferenceData,
        discovery: &'a DiscoveryConfig,
        maintenance: &'a MaintenanceConfig,
    ) -> Self {
        Self {
            client,
            source,
            reference,
            discovery,
            maintenance,
        }
    }

    /// Take one fleet snapshot for `model` and issue at most one action per aircraft.
    pub async fn run(&self, model: &AircraftModel) -> Result<LifecycleReport> {
        let fleet = self.client.list_fleet(model.id).await?;
        let mut report = LifecycleReport {
            model: model.short_name.clone(),
            inspected: fleet.len(),
            ..Default::default()
        };

        o_info!("🛫 {} fleet: {} aircraft", model.short_name, fleet.len());
        for (hub, destinations) in hub_route_counts(&fleet, &self.reference.hubs) {
            let served: usize = destinations.values().sum();
            o_debug!("   📍 {}: {} aircraft on {} routes", hub, served, destinations.len());
            for (destination, count) in destinations {
                o_trace!("      {}-{} x{}", hub, destination, count);
            }
        }

        for aircraft in &fleet {
            match plan_action(aircraft, model, self.maintenance) {
                PlannedAction::Nothing => {
                    o_debug!("   {} ({}) {}", aircraft.name, aircraft.id, aircraft.status);
                }
                PlannedAction::Check => match self.client.check_aircraft(aircraft.id).await {
                    Ok(()) => {
                        o_summary!("🔧 A-check ordered for {} ({}h left)", aircraft.name, aircraft.hours_to_check);
                        report.checked += 1;
                    }
                    Err(e) if e.is_authentication() => return Err(e),
                    Err(e) => {
                        o_error!("❌ A-check for {} failed: {}", aircraft.name, e);
                        report.failed += 1;
                    }
                },
                PlannedAction::Route => match self.route_parked(aircraft, model).await {
                    Ok(()) => report.routed += 1,
                    Err(e) if e.is_authentication() => return Err(e),
                    Err(e) => {
                        o_error!("❌ Could not route {}: {}", aircraft.name, e);
                        report.failed += 1;
                    }
                },
            }
        }

        Ok(report)
    }

    async fn route_parked(&self, aircraft: &FleetAircraft, model: &AircraftModel) -> Result<()> {
        let (origin, destination) = aircraft.route_pair().ok_or_else(|| {
            AutopilotError::Data(format!("aircraft name '{}' does not encode a route", aircraft.name))
        })?;
        let airport = self.reference.airport(destination).ok_or_else(|| {
            AutopilotError::Data(format!("destination {} is not in the airport list", destination))
        })?;

        let detail = self
            .source
            .get_route_ticket_detail(origin, destination, model.kind)
            .await?;
        let trips = trips_per_day(
            detail.distance,
            model.speed,
            self.discovery.hours_per_day(model.kind),
            self.discovery.speed_margin_factor,
        );
        if trips == 0 {
            return Err(AutopilotError::Data(format!(
                "{} reports an unusable distance {}",
                aircraft.name, detail.distance
            )));
        }

        let split = match detail.demand {
            ClassDemand::Passenger { first, business, economy } => Some(SeatConfig::Passenger(
                seat_config::passenger_split(first, business, economy, trips, model.capacity, self.discovery),
            )),
            ClassDemand::Cargo { large, .. } => {
                match seat_config::cargo_split(large, trips, model.capacity, self.discovery) {
                    CargoFit::Split(split) => Some(SeatConfig::Cargo(split)),
                    CargoFit::HeavySplitUnsupported => {
                        o_debug!("   {} keeps its current hold layout", aircraft.name);
                        None
                    }
                }
            }
        };

        if let Some(split) = split {
            if aircraft.seat_config != Some(split) {
                self.client.modify_aircraft(aircraft.id, &split).await?;
                o_debug!("   {} refitted to {}", aircraft.name, split);
            }
        }

        self.client
            .create_route(aircraft.id, &aircraft.name, airport.id, &detail.pricing)
            .await?;
        o_summary!("🗺️ Routed {} ({} trips/day)", aircraft.name, trips);
        Ok(())
    }
}
