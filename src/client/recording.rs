// Snapshot-backed collaborators: answer reads from a saved game state and record every
// intent instead of sending it to the game. Used for dry runs and by the test suite.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::{Mutex, MutexGuard};

use super::{GameClient, RouteDemandSource};
use crate::error::{AutopilotError, Result};
use crate::models::*;

/// Aircraft the game departs per request.
const DEPARTURES_PER_REQUEST: u32 = 20;

/// Saved game state plus the demand data a dry run needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub balance: i64,
    #[serde(default)]
    pub fuel: ResourceState,
    #[serde(default)]
    pub co2: ResourceState,
    #[serde(default)]
    pub fleet: Vec<FleetAircraft>,
    #[serde(default)]
    pub passenger_hangar: u32,
    #[serde(default)]
    pub cargo_hangar: u32,
    #[serde(default)]
    pub reputation: Reputation,
    #[serde(default)]
    pub eco_status: EcoStatus,
    #[serde(default)]
    pub routes: Vec<RouteListing>,
    /// Aircraft waiting at the gate.
    #[serde(default)]
    pub ready_to_depart: u32,
    /// Simulate a rejected login.
    #[serde(default)]
    pub reject_login: bool,
    /// Candidate feed keyed by origin IATA, in any order.
    #[serde(default)]
    pub candidates: HashMap<String, Vec<CandidateRoute>>,
    #[serde(default)]
    pub ticket_details: Vec<TicketDetailEntry>,
}

impl GameSnapshot {
    pub fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetailEntry {
    pub origin: String,
    pub destination: String,
    pub detail: RouteTicketDetail,
}

/// An intent issued to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    BuyResource { kind: ResourceKind, quantity: u64 },
    Depart,
    StartCampaign(CampaignKind),
    BuyAircraft { model_id: u32, hub_id: u64, engine_id: u32, name: String, split: SeatConfig },
    CreateRoute { aircraft_id: u64, name: String, destination_airport_id: u64, prices: TicketPrices },
    ModifyAircraft { aircraft_id: u64, split: SeatConfig },
    CheckAircraft { aircraft_id: u64 },
    SetTicketPrice { route_id: u64, prices: TicketPrices },
}

pub struct RecordingGameClient {
    state: Mutex<GameSnapshot>,
    actions: Mutex<Vec<GameAction>>,
    reads: Mutex<Vec<&'static str>>,
    failing_aircraft_purchases: bool,
}

impl RecordingGameClient {
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            actions: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
            failing_aircraft_purchases: false,
        }
    }

    /// Every buy-aircraft call is recorded and then rejected with a transport error.
    pub fn with_failing_aircraft_purchases(mut self) -> Self {
        self.failing_aircraft_purchases = true;
        self
    }

    pub fn actions(&self) -> Vec<GameAction> {
        lock(&self.actions).clone()
    }

    /// Names of the read calls made so far, in order.
    pub fn reads(&self) -> Vec<&'static str> {
        lock(&self.reads).clone()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.state).clone()
    }

    fn record(&self, action: GameAction) {
        lock(&self.actions).push(action);
    }

    fn read(&self, name: &'static str) -> MutexGuard<'_, GameSnapshot> {
        lock(&self.reads).push(name);
        lock(&self.state)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl GameClient for RecordingGameClient {
    async fn login(&self) -> Result<()> {
        if self.read("login").reject_login {
            return Err(AutopilotError::Authentication("login rejected".to_string()));
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        lock(&self.reads).push("logout");
        Ok(())
    }

    async fn get_balance(&self) -> Result<i64> {
        Ok(self.read("balance").balance)
    }

    async fn get_resource_state(&self, kind: ResourceKind) -> Result<ResourceState> {
        let state = self.read("resource_state");
        Ok(match kind {
            ResourceKind::Fuel => state.fuel,
            ResourceKind::Co2 => state.co2,
        })
    }

    async fn buy_resource(&self, kind: ResourceKind, quantity: u64) -> Result<()> {
        self.record(GameAction::BuyResource { kind, quantity });
        let mut state = lock(&self.state);
        let resource = match kind {
            ResourceKind::Fuel => state.fuel,
            ResourceKind::Co2 => state.co2,
        };
        let cost = (quantity as u128 * resource.price_unit as u128 / 1000) as i64;
        let updated = ResourceState {
            price_unit: resource.price_unit,
            capacity_free: resource.capacity_free.saturating_sub(quantity),
            holding: resource.holding.saturating_add(quantity as i64),
        };
        match kind {
            ResourceKind::Fuel => state.fuel = updated,
            ResourceKind::Co2 => state.co2 = updated,
        }
        state.balance -= cost;
        Ok(())
    }

    async fn depart_all_planes(&self) -> Result<bool> {
        self.record(GameAction::Depart);
        let mut state = lock(&self.state);
        let departed = state.ready_to_depart.min(DEPARTURES_PER_REQUEST);
        state.ready_to_depart -= departed;
        Ok(departed > 0)
    }

    async fn get_reputation(&self) -> Result<Reputation> {
        Ok(self.read("reputation").reputation)
    }

    async fn get_eco_status(&self) -> Result<EcoStatus> {
        Ok(self.read("eco_status").eco_status)
    }

    async fn start_campaign(&self, kind: CampaignKind) -> Result<()> {
        self.record(GameAction::StartCampaign(kind));
        Ok(())
    }

    async fn list_fleet(&self, model_id: u32) -> Result<Vec<FleetAircraft>> {
        let state = self.read("fleet");
        Ok(state
            .fleet
            .iter()
            .filter(|a| a.model_id == model_id)
            .cloned()
            .collect())
    }

    async fn get_hangar_capacity(&self, kind: FleetKind) -> Result<u32> {
        let state = self.read("hangar");
        Ok(match kind {
            FleetKind::Passenger => state.passenger_hangar,
            FleetKind::Cargo => state.cargo_hangar,
        })
    }

    async fn buy_aircraft(
        &self,
        model: &AircraftModel,
        hub: &Hub,
        engine_id: u32,
        name: &str,
        split: &SeatConfig,
    ) -> Result<()> {
        self.record(GameAction::BuyAircraft {
            model_id: model.id,
            hub_id: hub.hub_id,
            engine_id,
            name: name.to_string(),
            split: *split,
        });
        if self.failing_aircraft_purchases {
            return Err(AutopilotError::Transport(format!("order for {} timed out", name)));
        }

        let mut state = lock(&self.state);
        state.balance -= model.price;
        let hangar = match model.kind {
            FleetKind::Passenger => &mut state.passenger_hangar,
            FleetKind::Cargo => &mut state.cargo_hangar,
        };
        *hangar = hangar.saturating_sub(1);
        let id = state.fleet.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        state.fleet.push(FleetAircraft {
            id,
            model_id: model.id,
            name: name.to_string(),
            status: AircraftStatus::Parked,
            seat_config: Some(*split),
            hours_to_check: 500,
            at_base: true,
        });
        Ok(())
    }

    async fn create_route(
        &self,
        aircraft_id: u64,
        name: &str,
        destination_airport_id: u64,
        prices: &TicketPrices,
    ) -> Result<()> {
        self.record(GameAction::CreateRoute {
            aircraft_id,
            name: name.to_string(),
            destination_airport_id,
            prices: *prices,
        });
        let mut state = lock(&self.state);
        let Some(aircraft) = state.fleet.iter_mut().find(|a| a.id == aircraft_id) else {
            return Err(AutopilotError::Data(format!("no aircraft with id {}", aircraft_id)));
        };
        aircraft.status = AircraftStatus::Pending;
        Ok(())
    }

    async fn modify_aircraft(&self, aircraft_id: u64, split: &SeatConfig) -> Result<()> {
        self.record(GameAction::ModifyAircraft { aircraft_id, split: *split });
        let mut state = lock(&self.state);
        if let Some(aircraft) = state.fleet.iter_mut().find(|a| a.id == aircraft_id) {
            aircraft.seat_config = Some(*split);
        }
        Ok(())
    }

    async fn check_aircraft(&self, aircraft_id: u64) -> Result<()> {
        self.record(GameAction::CheckAircraft { aircraft_id });
        Ok(())
    }

    async fn list_routes(&self) -> Result<Vec<RouteListing>> {
        Ok(self.read("routes").routes.clone())
    }

    async fn set_ticket_price(&self, route_id: u64, prices: &TicketPrices) -> Result<()> {
        self.record(GameAction::SetTicketPrice { route_id, prices: *prices });
        Ok(())
    }
}

/// Candidate feed served from memory, ranked the way the live feed ranks it.
pub struct StaticDemandSource {
    candidates: HashMap<String, Vec<CandidateRoute>>,
    ticket_details: HashMap<(String, String), RouteTicketDetail>,
    page_size: usize,
    failing_pages: HashSet<(String, u32)>,
    pages_served: Mutex<Vec<(String, u32)>>,
}

impl StaticDemandSource {
    pub fn new(page_size: usize) -> Self {
        Self {
            candidates: HashMap::new(),
            ticket_details: HashMap::new(),
            page_size: page_size.max(1),
            failing_pages: HashSet::new(),
            pages_served: Mutex::new(Vec::new()),
        }
    }

    pub fn from_snapshot(snapshot: &GameSnapshot, page_size: usize) -> Self {
        let mut source = Self::new(page_size);
        for routes in snapshot.candidates.values() {
            for route in routes {
                source = source.with_candidate(route.clone());
            }
        }
        for entry in &snapshot.ticket_details {
            source = source.with_ticket_detail(&entry.origin, &entry.destination, entry.detail.clone());
        }
        source
    }

    pub fn with_candidate(mut self, route: CandidateRoute) -> Self {
        self.candidates
            .entry(route.origin.to_ascii_uppercase())
            .or_default()
            .push(route);
        self
    }

    pub fn with_ticket_detail(mut self, origin: &str, destination: &str, detail: RouteTicketDetail) -> Self {
        self.ticket_details
            .insert((origin.to_ascii_uppercase(), destination.to_ascii_uppercase()), detail);
        self
    }

    /// Serve a transport error for this page instead of data.
    pub fn with_failing_page(mut self, origin: &str, page: u32) -> Self {
        self.failing_pages.insert((origin.to_ascii_uppercase(), page));
        self
    }

    pub fn pages_served(&self) -> Vec<(String, u32)> {
        lock(&self.pages_served).clone()
    }
}

#[async_trait]
impl RouteDemandSource for StaticDemandSource {
    async fn search_routes(&self, origin: &str, sort_class: SortClass, page: u32) -> Result<RoutePage> {
        let origin_key = origin.to_ascii_uppercase();
        lock(&self.pages_served).push((origin_key.clone(), page));

        if self.failing_pages.contains(&(origin_key.clone(), page)) {
            return Err(AutopilotError::Transport(format!("page {} for {} unavailable", page, origin)));
        }

        let kind = sort_class.fleet_kind();
        let mut ranked: Vec<&CandidateRoute> = self
            .candidates
            .get(&origin_key)
            .map(|routes| routes.iter().filter(|r| r.demand.fleet_kind() == kind).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.demand.value(sort_class).cmp(&a.demand.value(sort_class)));

        let start = (page.saturating_sub(1) as usize).saturating_mul(self.page_size);
        let routes: Vec<CandidateRoute> = ranked
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|r| (*r).clone())
            .collect();
        let has_more = start + self.page_size < ranked.len();

        Ok(RoutePage { routes, has_more })
    }

    async fn get_route_ticket_detail(
        &self,
        origin: &str,
        destination: &str,
        kind: FleetKind,
    ) -> Result<RouteTicketDetail> {
        let key = (origin.to_ascii_uppercase(), destination.to_ascii_uppercase());
        match self.ticket_details.get(&key) {
            Some(detail) if detail.demand.fleet_kind() == kind => Ok(detail.clone()),
            Some(_) => Err(AutopilotError::Data(format!(
                "{}-{} has no {} demand",
                origin, destination, kind
            ))),
            None => Err(AutopilotError::Transport(format!(
                "no ticket detail for {}-{}",
                origin, destination
            ))),
        }
    }
}
