// Shared fixtures for the integration tests
#![allow(dead_code)]

use airline_autopilot::client::{GameSnapshot, RecordingGameClient, StaticDemandSource};
use airline_autopilot::config::{AutopilotConfig, DiscoveryConfig};
use airline_autopilot::models::*;

pub const HUB: &str = "AAA";
pub const SECOND_HUB: &str = "GGG";

/// 100-seat airliner. With the default discovery settings a 6000 km route is flown 5 times a day.
pub fn test_airliner() -> AircraftModel {
    AircraftModel {
        id: 11,
        short_name: "t100".to_string(),
        display_name: "Test 100".to_string(),
        price: 1_000_000,
        range: 10_000.0,
        runway: 5_000,
        capacity: 100,
        speed: 1_000.0,
        engine_id: 7,
        kind: FleetKind::Passenger,
    }
}

pub fn test_freighter() -> AircraftModel {
    AircraftModel {
        id: 12,
        short_name: "t100f".to_string(),
        display_name: "Test 100F".to_string(),
        price: 2_000_000,
        range: 10_000.0,
        runway: 5_000,
        capacity: 10_000,
        speed: 1_000.0,
        engine_id: 8,
        kind: FleetKind::Cargo,
    }
}

pub fn reference_data() -> ReferenceData {
    let airport = |id: u64, iata: &str, runway: u32| Airport {
        id,
        iata: iata.to_string(),
        runway,
    };
    ReferenceData {
        aircraft: vec![test_airliner(), test_freighter()],
        hubs: vec![
            Hub {
                hub_id: 1,
                iata: HUB.to_string(),
            },
            Hub {
                hub_id: 2,
                iata: SECOND_HUB.to_string(),
            },
        ],
        airports: vec![
            airport(100, "AAA", 12_000),
            airport(101, "BBB", 12_000),
            airport(102, "CCC", 12_000),
            airport(103, "DDD", 12_000),
            airport(104, "EEE", 12_000),
            airport(105, "FFF", 12_000),
            airport(106, "GGG", 12_000),
            airport(107, "HHH", 12_000),
            airport(108, "SHT", 4_000),
        ],
    }
}

pub fn discovery_config() -> DiscoveryConfig {
    AutopilotConfig::default().discovery
}

/// Config whose fleet entries point at the test airframes.
pub fn autopilot_config() -> AutopilotConfig {
    let mut config = AutopilotConfig::default();
    config.passenger_fleet.model = "t100".to_string();
    config.cargo_fleet.model = "t100f".to_string();
    config
}

pub fn hub(iata: &str) -> Hub {
    reference_data()
        .hub(iata)
        .cloned()
        .expect("fixture hub exists")
}

pub fn passenger_candidate(origin: &str, destination: &str, distance: f64, first: u32, business: u32, economy: u32) -> CandidateRoute {
    CandidateRoute {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance,
        demand: ClassDemand::Passenger { first, business, economy },
    }
}

/// Passes every passenger filter for the test airliner: 5 trips, 700 daily passengers.
pub fn strong_candidate(origin: &str, destination: &str, first: u32) -> CandidateRoute {
    passenger_candidate(origin, destination, 6_000.0, first, 200, 400)
}

pub fn aircraft(id: u64, name: &str, status: AircraftStatus) -> FleetAircraft {
    FleetAircraft {
        id,
        model_id: test_airliner().id,
        name: name.to_string(),
        status,
        seat_config: None,
        hours_to_check: 400,
        at_base: false,
    }
}

pub fn snapshot_with_balance(balance: i64) -> GameSnapshot {
    GameSnapshot {
        balance,
        ..Default::default()
    }
}

pub fn client_with(snapshot: GameSnapshot) -> RecordingGameClient {
    RecordingGameClient::new(snapshot)
}

pub fn source_with(candidates: Vec<CandidateRoute>, page_size: usize) -> StaticDemandSource {
    candidates
        .into_iter()
        .fold(StaticDemandSource::new(page_size), |source, candidate| source.with_candidate(candidate))
}
