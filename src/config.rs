use serde::{Deserialize, Serialize};
use crate::error::{AutopilotError, Result};
use crate::models::FleetKind;
use crate::o_info;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutopilotConfig {
    /// TOML file holding the aircraft catalog, hubs and airports
    pub reference_path: String,
    pub resources: ResourcesConfig,
    pub passenger_fleet: FleetConfig,
    pub cargo_fleet: FleetConfig,
    pub discovery: DiscoveryConfig,
    pub maintenance: MaintenanceConfig,
    pub campaigns: CampaignConfig,
    pub dispatch: DispatchConfig,
    pub demand_source: DemandSourceConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    pub fuel: ResourcePolicyConfig,
    pub co2: ResourcePolicyConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePolicyConfig {
    /// Fill to capacity whenever the price (per 1000 units) is below this
    pub immediate_threshold: u64,
    /// Top up to the floor whenever the price is below this and stock is low
    pub low_level_threshold: u64,
    /// Minimum stock to keep on hand
    pub low_level_floor: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Whether the acquisition step buys this kind of aircraft at all
    pub enabled: bool,
    /// Catalog short name of the airframe to buy and maintain
    pub model: String,
    /// Balance must exceed price * safety_factor before anything is bought
    pub safety_factor: f64,
    /// Quantity is floor(balance / (price * planning_factor))
    pub planning_factor: f64,
    /// Optional cap on new aircraft per hub in one pass
    #[serde(default)]
    pub max_per_hub: Option<u32>,
}

impl FleetConfig {
    /// Aircraft a hub may receive given what is left to place.
    pub fn hub_quota(&self, remaining: u32) -> u32 {
        self.max_per_hub.map_or(remaining, |cap| cap.min(remaining))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Hard stop on feed pages scanned per hub
    pub page_ceiling: u32,
    /// Cruise speed multiplier for the engine upgrade (1.1 = +10%)
    pub speed_margin_factor: f64,
    /// Flying hours per day for passenger aircraft (one hour kept for turnaround)
    pub passenger_hours_per_day: f64,
    pub cargo_hours_per_day: f64,
    /// Multiplier applied to per-trip class demand before fitting seats
    pub demand_safety_margin: f64,
    /// Routes flown this many times a day or fewer get the buffer below
    pub low_frequency_trips: u32,
    /// Seats added to each class on low-frequency routes
    pub low_frequency_buffer: u32,
    /// First-class demand floor as a share of daily capacity; below it the hub scan stops
    pub first_class_floor_ratio: f64,
    /// First+business demand floor as a share of daily capacity; below it the route is skipped
    pub combined_floor_ratio: f64,
    pub tolerance_factor: f64,
    pub cargo_yield_factor: f64,
    /// Large cargo packs into this share of the nominal hold
    pub cargo_volume_ratio: f64,
}

impl DiscoveryConfig {
    pub fn hours_per_day(&self, kind: FleetKind) -> f64 {
        match kind {
            FleetKind::Passenger => self.passenger_hours_per_day,
            FleetKind::Cargo => self.cargo_hours_per_day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// A-check is ordered once fewer than this many hours remain
    pub check_lead_time_hours: u32,
    /// Catalog short names that are never sent for checks (airframes being retired)
    #[serde(default)]
    pub excluded_models: Vec<String>,
}

impl MaintenanceConfig {
    pub fn is_excluded(&self, short_name: &str) -> bool {
        self.excluded_models
            .iter()
            .any(|m| m.eq_ignore_ascii_case(short_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub enabled: bool,
    /// Start an airline reputation campaign below this percentage
    pub min_passenger_reputation: u8,
    /// Start a cargo reputation campaign below this percentage
    pub min_cargo_reputation: u8,
    /// Keep the eco-friendly campaign running
    pub eco_friendly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// The game departs at most 20 aircraft per request
    pub depart_rounds: u32,
    pub update_ticket_prices: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSourceConfig {
    pub base_url: String,
    /// Append every feed request and response to feed_debug.log
    pub api_logging: bool,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub path: String,
    /// Unconfirmed purchases older than this are forgotten
    pub ttl_hours: i64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            reference_path: "config/reference.toml".to_string(),
            resources: ResourcesConfig {
                fuel: ResourcePolicyConfig {
                    immediate_threshold: 400,
                    low_level_threshold: 800,
                    low_level_floor: 10_000_000,
                },
                co2: ResourcePolicyConfig {
                    immediate_threshold: 111,
                    low_level_threshold: 140,
                    low_level_floor: 10_000_000,
                },
            },
            passenger_fleet: FleetConfig {
                enabled: true,
                model: "a339".to_string(),
                safety_factor: 1.2,
                planning_factor: 1.2,
                max_per_hub: None,
            },
            cargo_fleet: FleetConfig {
                enabled: false,
                model: "b748f".to_string(),
                safety_factor: 1.5,
                planning_factor: 1.5,
                max_per_hub: None,
            },
            discovery: DiscoveryConfig {
                page_ceiling: 500,
                speed_margin_factor: 1.1,
                passenger_hours_per_day: 23.0,
                cargo_hours_per_day: 24.0,
                demand_safety_margin: 1.1,
                low_frequency_trips: 2,
                low_frequency_buffer: 5,
                first_class_floor_ratio: 0.05,
                combined_floor_ratio: 0.2,
                tolerance_factor: 1.1,
                cargo_yield_factor: 1.0,
                cargo_volume_ratio: 0.7,
            },
            maintenance: MaintenanceConfig {
                check_lead_time_hours: 20,
                excluded_models: Vec::new(),
            },
            campaigns: CampaignConfig {
                enabled: false,
                min_passenger_reputation: 80,
                min_cargo_reputation: 80,
                eco_friendly: true,
            },
            dispatch: DispatchConfig {
                depart_rounds: 2,
                update_ticket_prices: false,
            },
            demand_source: DemandSourceConfig {
                base_url: "https://am4tools.com".to_string(),
                api_logging: false,
                timeout_seconds: 30,
            },
            ledger: LedgerConfig {
                path: "data/action_ledger.json".to_string(),
                ttl_hours: 6,
            },
        }
    }
}

impl AutopilotConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self> {
        if Path::new(config_path).exists() {
            o_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: AutopilotConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            o_info!("📋 Creating default configuration at {}", config_path);
            let config = AutopilotConfig::default();
            config.save(config_path)?;
            o_info!("💡 Edit {} to customize autopilot behavior", config_path);
            Ok(config)
        }
    }

    /// Load, then refuse to continue on any invalid value
    pub fn load_validated(config_path: &str) -> Result<Self> {
        let config = Self::load_or_create(config_path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn fleet(&self, kind: FleetKind) -> &FleetConfig {
        match kind {
            FleetKind::Passenger => &self.passenger_fleet,
            FleetKind::Cargo => &self.cargo_fleet,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, policy) in [("fuel", &self.resources.fuel), ("co2", &self.resources.co2)] {
            if policy.immediate_threshold == 0 || policy.low_level_threshold == 0 {
                return Err(invalid(format!("resources.{} thresholds must be positive", name)));
            }
        }

        for (name, fleet) in [("passenger_fleet", &self.passenger_fleet), ("cargo_fleet", &self.cargo_fleet)] {
            if fleet.model.trim().is_empty() {
                return Err(invalid(format!("{}.model must name a catalog entry", name)));
            }
            let at_least_one = |f: f64| f.is_finite() && f >= 1.0;
            if !at_least_one(fleet.safety_factor) || !at_least_one(fleet.planning_factor) {
                return Err(invalid(format!(
                    "{}.safety_factor and planning_factor must be at least 1.0",
                    name
                )));
            }
            if fleet.max_per_hub == Some(0) {
                return Err(invalid(format!("{}.max_per_hub must be positive when set", name)));
            }
        }

        let d = &self.discovery;
        if d.page_ceiling == 0 {
            return Err(invalid("discovery.page_ceiling must be greater than 0".to_string()));
        }
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(d.speed_margin_factor) || !positive(d.demand_safety_margin) || !positive(d.tolerance_factor) {
            return Err(invalid("discovery margins and tolerance must be positive".to_string()));
        }
        let valid_hours = |h: f64| positive(h) && h <= 24.0;
        if !valid_hours(d.passenger_hours_per_day) || !valid_hours(d.cargo_hours_per_day) {
            return Err(invalid("discovery hours per day must be within (0, 24]".to_string()));
        }
        for (field, ratio) in [
            ("first_class_floor_ratio", d.first_class_floor_ratio),
            ("combined_floor_ratio", d.combined_floor_ratio),
            ("cargo_volume_ratio", d.cargo_volume_ratio),
        ] {
            if !positive(ratio) || ratio > 1.0 {
                return Err(invalid(format!("discovery.{} must be within (0, 1]", field)));
            }
        }
        if !positive(d.cargo_yield_factor) {
            return Err(invalid("discovery.cargo_yield_factor must be positive".to_string()));
        }

        if self.campaigns.min_passenger_reputation > 100 || self.campaigns.min_cargo_reputation > 100 {
            return Err(invalid("campaign reputation floors are percentages".to_string()));
        }
        if self.ledger.ttl_hours <= 0 {
            return Err(invalid("ledger.ttl_hours must be positive".to_string()));
        }
        if self.demand_source.base_url.trim().is_empty() {
            return Err(invalid("demand_source.base_url must be set".to_string()));
        }

        o_info!("✅ Configuration validation passed");
        Ok(())
    }

    pub fn print_summary(&self) {
        let fuel = &self.resources.fuel;
        let co2 = &self.resources.co2;
        o_info!("📋 Configuration Summary:");
        o_info!(
            "   ⛽ Fuel: fill below ${}, top up to {} below ${}",
            fuel.immediate_threshold, fuel.low_level_floor, fuel.low_level_threshold
        );
        o_info!(
            "   🌱 CO2: fill below ${}, top up to {} below ${}",
            co2.immediate_threshold, co2.low_level_floor, co2.low_level_threshold
        );
        for fleet in [&self.passenger_fleet, &self.cargo_fleet] {
            o_info!(
                "   ✈️ {} purchases {} (safety x{:.2}, planning x{:.2})",
                fleet.model,
                if fleet.enabled { "enabled" } else { "disabled" },
                fleet.safety_factor,
                fleet.planning_factor
            );
        }
        o_info!("   🔧 A-check lead time: {}h", self.maintenance.check_lead_time_hours);
        o_info!("   📄 Feed page ceiling: {}", self.discovery.page_ceiling);
    }
}

fn invalid(message: String) -> AutopilotError {
    AutopilotError::Config(message)
}
