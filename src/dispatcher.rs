// Dispatcher - one full autopilot pass, bracketed by login and logout
use rand::Rng;

use crate::client::{GameClient, RouteDemandSource};
use crate::config::AutopilotConfig;
use crate::error::{AutopilotError, Result};
use crate::models::*;
use crate::operations::*;
use crate::output_broker::flush_summaries;
use crate::storage::ActionLedger;
use crate::{o_debug, o_error, o_info, o_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    Departures,
    Resources,
    Campaigns,
    Lifecycle,
    Acquisition,
    Tickets,
}

impl CycleStep {
    /// Every step, in the order a pass runs them.
    pub const ALL: [CycleStep; 6] = [
        CycleStep::Departures,
        CycleStep::Resources,
        CycleStep::Campaigns,
        CycleStep::Lifecycle,
        CycleStep::Acquisition,
        CycleStep::Tickets,
    ];

    /// The steps a scheduled cycle runs under this configuration.
    pub fn scheduled(config: &AutopilotConfig) -> Vec<CycleStep> {
        Self::ALL
            .into_iter()
            .filter(|step| *step != CycleStep::Tickets || config.dispatch.update_ticket_prices)
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleStep::Departures => "departures",
            CycleStep::Resources => "resources",
            CycleStep::Campaigns => "campaigns",
            CycleStep::Lifecycle => "lifecycle",
            CycleStep::Acquisition => "acquisition",
            CycleStep::Tickets => "tickets",
        }
    }
}

#[derive(Debug, Default)]
pub struct CycleReport {
    /// Depart calls that sent at least one aircraft out.
    pub departure_rounds: u32,
    pub resources: Vec<(ResourceKind, PurchaseDecision)>,
    pub campaigns: Vec<CampaignKind>,
    pub lifecycle: Vec<LifecycleReport>,
    pub acquisitions: Vec<AcquisitionPlan>,
    pub tickets_updated: Option<usize>,
    /// Steps or sub-steps that failed with a non-fatal error.
    pub errors: u32,
}

pub struct Dispatcher<'a> {
    client: &'a dyn GameClient,
    source: &'a dyn RouteDemandSource,
    config: &'a AutopilotConfig,
    reference: &'a ReferenceData,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        client: &'a dyn GameClient,
        source: &'a dyn RouteDemandSource,
        config: &'a AutopilotConfig,
        reference: &'a ReferenceData,
    ) -> Self {
        Self {
            client,
            source,
            config,
            reference,
        }
    }

    pub async fn run_cycle<R: Rng + ?Sized>(&self, ledger: &mut ActionLedger, rng: &mut R) -> Result<CycleReport> {
        let steps = CycleStep::scheduled(self.config);
        self.run(&steps, ledger, rng).await
    }

    /// Log in, run the requested steps in canonical order, then log out.
    ///
    /// A failed login returns before anything else is called. An authentication error from
    /// any step ends the pass; other step failures are logged and the pass moves on.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        steps: &[CycleStep],
        ledger: &mut ActionLedger,
        rng: &mut R,
    ) -> Result<CycleReport> {
        if let Err(e) = self.client.login().await {
            o_error!("❌ Login failed: {}", e);
            flush_summaries().await;
            return Err(e);
        }
        o_info!("✅ Logged in");

        let outcome = self.run_steps(steps, ledger, rng).await;

        if let Err(e) = self.client.logout().await {
            o_error!("⚠️ Logout failed: {}", e);
        }
        if let Ok(report) = &outcome {
            o_summary!(
                "🏁 Pass complete: {} aircraft ordered, {} routed, {} checks, {} errors",
                report.acquisitions.iter().map(|p| p.purchased()).sum::<usize>(),
                report.lifecycle.iter().map(|l| l.routed).sum::<usize>(),
                report.lifecycle.iter().map(|l| l.checked).sum::<usize>(),
                report.errors
            );
        }
        flush_summaries().await;
        outcome
    }

    async fn run_steps<R: Rng + ?Sized>(
        &self,
        steps: &[CycleStep],
        ledger: &mut ActionLedger,
        rng: &mut R,
    ) -> Result<CycleReport> {
        let mut report = CycleReport::default();

        for step in CycleStep::ALL {
            if !steps.contains(&step) {
                continue;
            }
            o_debug!("═══ {} ═══", step.label());

            let result = match step {
                CycleStep::Departures => self.departures(&mut report).await,
                CycleStep::Resources => self.resources(&mut report).await,
                CycleStep::Campaigns => self.campaigns(&mut report).await,
                CycleStep::Lifecycle => self.lifecycle(&mut report).await,
                CycleStep::Acquisition => self.acquisition(&mut report, ledger, rng).await,
                CycleStep::Tickets => self.tickets(&mut report).await,
            };

            match result {
                Ok(()) => {}
                Err(e) if e.is_authentication() => {
                    o_error!("❌ Session lost during {}: {}", step.label(), e);
                    return Err(e);
                }
                Err(e) => {
                    o_error!("❌ {} step failed: {}", step.label(), e);
                    report.errors += 1;
                }
            }
        }

        Ok(report)
    }

    async fn departures(&self, report: &mut CycleReport) -> Result<()> {
        for _ in 0..self.config.dispatch.depart_rounds {
            if !self.client.depart_all_planes().await? {
                break;
            }
            report.departure_rounds += 1;
        }
        if report.departure_rounds > 0 {
            o_summary!("🛫 Departed aircraft in {} round(s)", report.departure_rounds);
        }
        Ok(())
    }

    async fn resources(&self, report: &mut CycleReport) -> Result<()> {
        let ops = ResourceOperations::new(self.client);
        let policies = [
            (ResourceKind::Fuel, &self.config.resources.fuel),
            (ResourceKind::Co2, &self.config.resources.co2),
        ];
        for (kind, policy) in policies {
            match ops.replenish(kind, policy).await {
                Ok(decision) => report.resources.push((kind, decision)),
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => {
                    o_error!("❌ {} purchase failed: {}", kind.label(), e);
                    report.errors += 1;
                }
            }
        }
        Ok(())
    }

    async fn campaigns(&self, report: &mut CycleReport) -> Result<()> {
        report.campaigns = CampaignOperations::new(self.client)
            .run(&self.config.campaigns)
            .await?;
        Ok(())
    }

    /// Lifecycle runs for every configured model in the catalog, purchases enabled or not.
    async fn lifecycle(&self, report: &mut CycleReport) -> Result<()> {
        let coordinator = FleetLifecycleCoordinator::new(
            self.client,
            self.source,
            self.reference,
            &self.config.discovery,
            &self.config.maintenance,
        );

        let mut seen: Vec<u32> = Vec::new();
        for kind in [FleetKind::Passenger, FleetKind::Cargo] {
            let fleet_config = self.config.fleet(kind);
            let model = match self.reference.model(&fleet_config.model) {
                Ok(model) => model,
                Err(e) => {
                    o_debug!("   no {} lifecycle: {}", kind, e);
                    continue;
                }
            };
            if seen.contains(&model.id) {
                continue;
            }
            seen.push(model.id);

            match coordinator.run(model).await {
                Ok(lifecycle) => {
                    report.errors += lifecycle.failed as u32;
                    report.lifecycle.push(lifecycle);
                }
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => {
                    o_error!("❌ {} lifecycle failed: {}", model.short_name, e);
                    report.errors += 1;
                }
            }
        }
        Ok(())
    }

    /// Passenger fleet first, then cargo. Balance, hangar and fleet are read fresh for each.
    async fn acquisition<R: Rng + ?Sized>(
        &self,
        report: &mut CycleReport,
        ledger: &mut ActionLedger,
        rng: &mut R,
    ) -> Result<()> {
        let expired = ledger.cleanup_expired(self.config.ledger.ttl_hours);
        if expired > 0 {
            o_info!("🧹 Dropped {} unconfirmed purchase(s) older than {}h", expired, self.config.ledger.ttl_hours);
        }

        for kind in [FleetKind::Passenger, FleetKind::Cargo] {
            let fleet_config = self.config.fleet(kind);
            if !fleet_config.enabled {
                o_debug!("   {} purchases disabled", kind);
                continue;
            }

            match self.acquire(kind, ledger, rng).await {
                Ok(plan) => {
                    let routes = plan.route_names();
                    if !routes.is_empty() {
                        o_summary!("🛬 New {} routes: {}", kind, routes.join(", "));
                    }
                    report.acquisitions.push(plan);
                }
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => {
                    o_error!("❌ {} acquisition failed: {}", kind, e);
                    report.errors += 1;
                }
            }
        }
        Ok(())
    }

    async fn acquire<R: Rng + ?Sized>(
        &self,
        kind: FleetKind,
        ledger: &mut ActionLedger,
        rng: &mut R,
    ) -> Result<AcquisitionPlan> {
        let fleet_config = self.config.fleet(kind);
        let model = self.reference.model(&fleet_config.model)?;
        if model.kind != kind {
            return Err(AutopilotError::Config(format!(
                "{} is a {} aircraft, not {}",
                model.short_name, model.kind, kind
            )));
        }

        let balance = self.client.get_balance().await?;
        let hangar_capacity = self.client.get_hangar_capacity(kind).await?;
        let fleet = self.client.list_fleet(model.id).await?;

        let discovery = RouteDiscovery::new(self.source, self.reference, &self.config.discovery);
        let planner = FleetAcquisitionPlanner::new(self.client, discovery, fleet_config);
        let input = PlanningInput {
            model,
            balance,
            hangar_capacity,
            hubs: &self.reference.hubs,
            fleet: &fleet,
        };

        planner
            .plan(input, |_, remaining| fleet_config.hub_quota(remaining), rng, ledger)
            .await
    }

    async fn tickets(&self, report: &mut CycleReport) -> Result<()> {
        let updated = TicketPricing::new(self.client, self.source).update_all().await?;
        report.tickets_updated = Some(updated);
        Ok(())
    }
}
