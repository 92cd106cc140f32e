mod common;

use airline_autopilot::models::{CargoSplit, PassengerSplit};
use airline_autopilot::operations::*;
use common::*;

#[test]
fn test_first_class_demand_fills_cabin() {
    let split = configure(
        ScaledDemand {
            first: 350,
            business: 10,
            economy: 10,
        },
        300,
    );
    assert_eq!(
        split,
        PassengerSplit {
            economy: 0,
            business: 0,
            first: 300,
        }
    );
}

#[test]
fn test_economy_takes_the_remainder() {
    let split = configure(
        ScaledDemand {
            first: 50,
            business: 100,
            economy: 0,
        },
        300,
    );
    assert_eq!(
        split,
        PassengerSplit {
            economy: 150,
            business: 100,
            first: 50,
        }
    );
}

#[test]
fn test_business_capped_by_remaining_seats() {
    let split = configure(
        ScaledDemand {
            first: 120,
            business: 400,
            economy: 900,
        },
        300,
    );
    assert_eq!(split.first, 120);
    assert_eq!(split.business, 180);
    assert_eq!(split.economy, 0);
}

#[test]
fn test_split_always_fills_cabin() {
    let demands = [(0, 0, 0), (1, 1, 1), (299, 1, 0), (u32::MAX, u32::MAX, 0), (10, u32::MAX, 5)];
    for (first, business, economy) in demands {
        let split = configure(ScaledDemand { first, business, economy }, 300);
        assert_eq!(split.total(), 300, "Split for {:?} should fill the cabin", (first, business, economy));
    }
}

#[test]
fn test_economy_demand_does_not_change_split() {
    let low = configure(ScaledDemand { first: 40, business: 90, economy: 1 }, 250);
    let high = configure(ScaledDemand { first: 40, business: 90, economy: 5_000 }, 250);
    assert_eq!(low, high);
}

#[test]
fn test_demand_scaling_and_low_frequency_buffer() {
    let config = discovery_config();

    // 210 per day over 4 trips is 52.5, +10% margin rounds up to 58
    assert_eq!(scale_class_demand(210, 4, &config), 58);
    // Two trips a day or fewer get the buffer
    assert_eq!(scale_class_demand(210, 2, &config), 116 + 5);
    assert_eq!(scale_class_demand(0, 1, &config), 5);
    assert_eq!(scale_class_demand(210, 0, &config), 0);
}

#[test]
fn test_cargo_split_full_large() {
    let config = discovery_config();

    // 400k large over 4 trips = 100k per trip, above 70% of a 100k hold
    assert_eq!(cargo_split(400_000, 4, 100_000, &config), CargoFit::Split(CargoSplit::FULL_LARGE));
    // 200k over 4 trips = 50k per trip, below 70k
    assert_eq!(cargo_split(200_000, 4, 100_000, &config), CargoFit::HeavySplitUnsupported);
}
