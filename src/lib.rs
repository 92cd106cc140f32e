// Airline Autopilot Library
// Decision engine for one automated airline management pass

pub mod models;
pub mod client;
pub mod operations;
pub mod dispatcher;
pub mod storage;
pub mod config;
pub mod error;
pub mod verbosity;
pub mod output_broker;

// Re-export commonly used types
pub use models::{
    aircraft::{AircraftModel, FleetKind},
    fleet::{AircraftStatus, FleetAircraft, SeatConfig},
    reference::ReferenceData,
    resource::{ResourceKind, ResourceState},
};

pub use client::{GameClient, RouteDemandSource};
pub use config::AutopilotConfig;
pub use dispatcher::{CycleReport, CycleStep, Dispatcher};
pub use error::{AutopilotError, Result};
pub use storage::ActionLedger;

// Constants
pub const DEFAULT_CONFIG_PATH: &str = "config/autopilot.toml";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/snapshot.json";
