mod common;

use airline_autopilot::client::{GameAction, GameSnapshot, RecordingGameClient, StaticDemandSource};
use airline_autopilot::config::{AutopilotConfig, MaintenanceConfig};
use airline_autopilot::models::*;
use airline_autopilot::operations::*;
use common::*;

fn maintenance() -> MaintenanceConfig {
    AutopilotConfig::default().maintenance
}

fn pricing() -> TicketPrices {
    TicketPrices::Passenger {
        economy: 1_200,
        business: 2_600,
        first: 4_000,
    }
}

fn source_with_detail() -> StaticDemandSource {
    StaticDemandSource::new(10).with_ticket_detail(
        HUB,
        "BBB",
        RouteTicketDetail {
            distance: 6_000.0,
            demand: ClassDemand::Passenger {
                first: 100,
                business: 200,
                economy: 400,
            },
            pricing: pricing(),
        },
    )
}

fn expected_split() -> SeatConfig {
    SeatConfig::Passenger(passenger_split(100, 200, 400, 5, 100, &discovery_config()))
}

fn snapshot_with_fleet(fleet: Vec<FleetAircraft>) -> GameSnapshot {
    GameSnapshot {
        fleet,
        ..Default::default()
    }
}

async fn run_lifecycle(
    client: &RecordingGameClient,
    source: &StaticDemandSource,
    maintenance: &MaintenanceConfig,
) -> LifecycleReport {
    let reference = reference_data();
    let discovery = discovery_config();
    FleetLifecycleCoordinator::new(client, source, &reference, &discovery, maintenance)
        .run(&test_airliner())
        .await
        .expect("lifecycle pass should succeed")
}

#[test]
fn test_plan_action() {
    let model = test_airliner();
    let policy = maintenance();

    let parked = aircraft(1, "AAA-BBB", AircraftStatus::Parked);
    assert_eq!(plan_action(&parked, &model, &policy), PlannedAction::Route);

    let due_away = FleetAircraft {
        hours_to_check: 10,
        ..aircraft(2, "AAA-BBB", AircraftStatus::Routed)
    };
    assert_eq!(plan_action(&due_away, &model, &policy), PlannedAction::Nothing);

    let due_home = FleetAircraft {
        at_base: true,
        ..due_away.clone()
    };
    assert_eq!(plan_action(&due_home, &model, &policy), PlannedAction::Check);

    let due_parked = FleetAircraft {
        status: AircraftStatus::Parked,
        ..due_home.clone()
    };
    assert_eq!(plan_action(&due_parked, &model, &policy), PlannedAction::Check);

    let at_lead_time = FleetAircraft {
        hours_to_check: 20,
        ..due_home.clone()
    };
    assert_eq!(plan_action(&at_lead_time, &model, &policy), PlannedAction::Nothing);

    let retiring = MaintenanceConfig {
        excluded_models: vec!["T100".to_string()],
        ..maintenance()
    };
    assert_eq!(plan_action(&due_home, &model, &retiring), PlannedAction::Nothing);
}

#[tokio::test]
async fn test_parked_aircraft_is_refitted_and_routed() {
    let client = client_with(snapshot_with_fleet(vec![aircraft(1, "AAA-BBB", AircraftStatus::Parked)]));
    let source = source_with_detail();

    let report = run_lifecycle(&client, &source, &maintenance()).await;

    assert_eq!(report.routed, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(
        client.actions(),
        vec![
            GameAction::ModifyAircraft {
                aircraft_id: 1,
                split: expected_split(),
            },
            GameAction::CreateRoute {
                aircraft_id: 1,
                name: "AAA-BBB".to_string(),
                destination_airport_id: 101,
                prices: pricing(),
            },
        ]
    );

    println!("✅ Routing test passed - {} actions", client.actions().len());
}

#[tokio::test]
async fn test_matching_layout_is_not_modified() {
    let parked = FleetAircraft {
        seat_config: Some(expected_split()),
        ..aircraft(1, "AAA-BBB", AircraftStatus::Parked)
    };
    let client = client_with(snapshot_with_fleet(vec![parked]));
    let source = source_with_detail();

    run_lifecycle(&client, &source, &maintenance()).await;

    let actions = client.actions();
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], GameAction::CreateRoute { aircraft_id: 1, .. }));
}

#[tokio::test]
async fn test_due_checks_are_ordered() {
    let fleet = vec![
        FleetAircraft {
            hours_to_check: 10,
            at_base: true,
            ..aircraft(2, "AAA-CCC", AircraftStatus::Routed)
        },
        FleetAircraft {
            hours_to_check: 10,
            ..aircraft(3, "AAA-DDD", AircraftStatus::Routed)
        },
        FleetAircraft {
            hours_to_check: 5,
            at_base: true,
            ..aircraft(4, "AAA-BBB", AircraftStatus::Parked)
        },
    ];
    let client = client_with(snapshot_with_fleet(fleet));
    let source = source_with_detail();

    let report = run_lifecycle(&client, &source, &maintenance()).await;

    assert_eq!(report.checked, 2);
    assert_eq!(report.routed, 0, "A due check wins over routing");
    assert_eq!(
        client.actions(),
        vec![
            GameAction::CheckAircraft { aircraft_id: 2 },
            GameAction::CheckAircraft { aircraft_id: 4 },
        ]
    );
}

#[tokio::test]
async fn test_unroutable_aircraft_are_skipped() {
    let fleet = vec![
        aircraft(1, "AAA-ZZZ", AircraftStatus::Parked),
        aircraft(2, "AAA-CCC", AircraftStatus::Parked),
        aircraft(3, "unnamed", AircraftStatus::Parked),
        aircraft(4, "AAA-BBB", AircraftStatus::Parked),
    ];
    let client = client_with(snapshot_with_fleet(fleet));
    let source = source_with_detail();

    let report = run_lifecycle(&client, &source, &maintenance()).await;

    assert_eq!(report.inspected, 4);
    assert_eq!(report.failed, 3);
    assert_eq!(report.routed, 1);
    assert!(
        client
            .actions()
            .iter()
            .all(|a| !matches!(a, GameAction::CreateRoute { aircraft_id: 1 | 2 | 3, .. })),
        "Only the routable aircraft gets a route"
    );
}

#[tokio::test]
async fn test_other_models_are_ignored() {
    let other = FleetAircraft {
        model_id: 999,
        ..aircraft(1, "AAA-BBB", AircraftStatus::Parked)
    };
    let client = client_with(snapshot_with_fleet(vec![other]));
    let source = source_with_detail();

    let report = run_lifecycle(&client, &source, &maintenance()).await;

    assert_eq!(report.inspected, 0);
    assert!(client.actions().is_empty());
}
