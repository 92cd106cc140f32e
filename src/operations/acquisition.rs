// Budget-aware fleet expansion across hubs
use rand::Rng;
use rand::seq::SliceRandom;

use crate::client::GameClient;
use crate::config::FleetConfig;
use crate::error::Result;
use crate::models::*;
use crate::operations::route_discovery::{existing_destinations, RouteDiscovery};
use crate::storage::ActionLedger;
use crate::{o_error, o_info, o_summary};

/// State read once at the start of a planning pass.
pub struct PlanningInput<'b> {
    pub model: &'b AircraftModel,
    pub balance: i64,
    /// Free hangar slots for this fleet kind.
    pub hangar_capacity: u32,
    pub hubs: &'b [Hub],
    pub fleet: &'b [FleetAircraft],
}

/// Aircraft to aim for, or why nothing can be bought.
pub fn purchasable_quantity(
    model: &AircraftModel,
    fleet_config: &FleetConfig,
    balance: i64,
    hangar_capacity: u32,
) -> std::result::Result<u32, AcquisitionOutcome> {
    let required = model.price as f64 * fleet_config.safety_factor;
    if balance as f64 <= required {
        return Err(AcquisitionOutcome::InsufficientFunds { balance, required });
    }
    if hangar_capacity == 0 {
        return Err(AcquisitionOutcome::NoHangarSpace);
    }

    let affordable = (balance as f64 / (model.price as f64 * fleet_config.planning_factor)).floor();
    let affordable = affordable.clamp(0.0, u32::MAX as f64) as u32;
    Ok(affordable.min(hangar_capacity))
}

pub struct FleetAcquisitionPlanner<'a> {
    client: &'a dyn GameClient,
    discovery: RouteDiscovery<'a>,
    fleet_config: &'a FleetConfig,
}

impl<'a> FleetAcquisitionPlanner<'a> {
    pub fn new(client: &'a dyn GameClient, discovery: RouteDiscovery<'a>, fleet_config: &'a FleetConfig) -> Self {
        Self {
            client,
            discovery,
            fleet_config,
        }
    }

    /// Plan and buy in one pass. Hubs are visited in a random order; every purchase call,
    /// accepted or not, counts against the quantity computed from the opening balance.
    pub async fn plan<R, Q>(
        &self,
        input: PlanningInput<'_>,
        per_hub_quota: Q,
        rng: &mut R,
        ledger: &mut ActionLedger,
    ) -> Result<AcquisitionPlan>
    where
        R: Rng + ?Sized,
        Q: Fn(&Hub, u32) -> u32,
    {
        let model = input.model;
        let quantity = match purchasable_quantity(model, self.fleet_config, input.balance, input.hangar_capacity) {
            Ok(quantity) => quantity,
            Err(outcome) => {
                match &outcome {
                    AcquisitionOutcome::InsufficientFunds { balance, required } => o_summary!(
                        "💸 Not buying {}: balance {} does not clear {:.0}",
                        model.short_name,
                        balance,
                        required
                    ),
                    _ => o_summary!("🏚️ Not buying {}: no hangar space", model.short_name),
                }
                return Ok(AcquisitionPlan::aborted(&model.short_name, outcome));
            }
        };

        o_info!(
            "🛒 Planning up to {} x {} (${} each) across {} hubs",
            quantity,
            model.display_name,
            model.price,
            input.hubs.len()
        );

        ledger.reconcile(&model.short_name, input.fleet);
        let mut known_routes: Vec<String> = input
            .fleet
            .iter()
            .map(|a| a.name.as_str())
            .chain(ledger.pending_route_names(&model.short_name))
            .map(str::to_string)
            .collect();

        let mut hubs: Vec<&Hub> = input.hubs.iter().collect();
        hubs.shuffle(rng);

        let mut remaining = quantity;
        let mut failed_purchases = 0;
        let mut per_hub = Vec::new();

        for hub in hubs {
            if remaining == 0 {
                break;
            }
            let max_results = per_hub_quota(hub, remaining).min(remaining);
            if max_results == 0 {
                continue;
            }

            let existing = existing_destinations(known_routes.iter().map(String::as_str), &hub.iata);
            let routes = self.discovery.discover(model, hub, &existing, max_results).await;

            let mut bought = Vec::new();
            for (_, allocation) in routes {
                if remaining == 0 {
                    break;
                }
                remaining -= 1;

                match self
                    .client
                    .buy_aircraft(model, hub, model.engine_id, &allocation.route_name, &allocation.split)
                    .await
                {
                    Ok(()) => {
                        o_summary!(
                            "✈️ Ordered {} for {} ({})",
                            model.short_name,
                            allocation.route_name,
                            allocation.split
                        );
                        ledger.record_purchase(&allocation.route_name, &hub.iata, &model.short_name);
                        known_routes.push(allocation.route_name.clone());
                        bought.push(allocation);
                    }
                    Err(e) => {
                        o_error!("❌ Order for {} failed: {}", allocation.route_name, e);
                        failed_purchases += 1;
                    }
                }
            }

            if !bought.is_empty() {
                per_hub.push(HubAllocation {
                    hub: hub.clone(),
                    routes: bought,
                });
            }
        }

        if let Err(e) = ledger.save() {
            o_error!("⚠️ Could not save action ledger: {}", e);
        }

        if remaining > 0 {
            o_summary!(
                "📭 Could not place {} x {}: no further viable routes",
                remaining,
                model.short_name
            );
        }

        Ok(AcquisitionPlan {
            model: model.short_name.clone(),
            quantity,
            per_hub,
            failed_purchases,
            unplaced: remaining,
            outcome: AcquisitionOutcome::Completed,
        })
    }
}
