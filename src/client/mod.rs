// Client module - the game and demand-feed collaborators the engine talks to
pub mod am4tools;
pub mod recording;

pub use am4tools::Am4ToolsDemandSource;
pub use recording::{GameAction, GameSnapshot, RecordingGameClient, StaticDemandSource, TicketDetailEntry};

use crate::error::Result;
use crate::models::*;
use async_trait::async_trait;

/// The game itself. Implementations own the session, scrape values into typed numbers and
/// turn intents into game requests. The engine never mutates fleet state directly.
#[async_trait]
pub trait GameClient: Send + Sync {
    /// Establish a session. An `Authentication` error aborts the whole pass.
    async fn login(&self) -> Result<()>;
    async fn logout(&self) -> Result<()>;

    async fn get_balance(&self) -> Result<i64>;
    async fn get_resource_state(&self, kind: ResourceKind) -> Result<ResourceState>;
    async fn buy_resource(&self, kind: ResourceKind, quantity: u64) -> Result<()>;

    /// Depart every aircraft that is ready. Returns false when nothing left the gate.
    async fn depart_all_planes(&self) -> Result<bool>;

    async fn get_reputation(&self) -> Result<Reputation>;
    async fn get_eco_status(&self) -> Result<EcoStatus>;
    async fn start_campaign(&self, kind: CampaignKind) -> Result<()>;

    async fn list_fleet(&self, model_id: u32) -> Result<Vec<FleetAircraft>>;
    /// Free hangar slots for the given fleet kind.
    async fn get_hangar_capacity(&self, kind: FleetKind) -> Result<u32>;

    async fn buy_aircraft(
        &self,
        model: &AircraftModel,
        hub: &Hub,
        engine_id: u32,
        name: &str,
        split: &SeatConfig,
    ) -> Result<()>;
    async fn create_route(
        &self,
        aircraft_id: u64,
        name: &str,
        destination_airport_id: u64,
        prices: &TicketPrices,
    ) -> Result<()>;
    async fn modify_aircraft(&self, aircraft_id: u64, split: &SeatConfig) -> Result<()>;
    async fn check_aircraft(&self, aircraft_id: u64) -> Result<()>;

    async fn list_routes(&self) -> Result<Vec<RouteListing>>;
    async fn set_ticket_price(&self, route_id: u64, prices: &TicketPrices) -> Result<()>;
}

/// Ranked candidate feed.
///
/// `search_routes` must return candidates in non-increasing order of demand for
/// `sort_class`, across pages as well as within them. Route discovery stops scanning a hub
/// at the first candidate below its demand floor; a feed without this ordering would make
/// that early exit drop viable routes.
#[async_trait]
pub trait RouteDemandSource: Send + Sync {
    /// Pages are numbered from 1.
    async fn search_routes(&self, origin: &str, sort_class: SortClass, page: u32) -> Result<RoutePage>;

    async fn get_route_ticket_detail(
        &self,
        origin: &str,
        destination: &str,
        kind: FleetKind,
    ) -> Result<RouteTicketDetail>;
}
