use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::aircraft::AircraftModel;
use crate::error::{AutopilotError, Result};
use crate::o_info;

/// A home base new routes are planned from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hub {
    pub hub_id: u64,
    pub iata: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: u64,
    pub iata: String,
    /// Runway length in ft.
    pub runway: u32,
}

/// Aircraft catalog, hub list and airport list. Loaded once per pass and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub aircraft: Vec<AircraftModel>,
    #[serde(default)]
    pub hubs: Vec<Hub>,
    #[serde(default)]
    pub airports: Vec<Airport>,
}

impl ReferenceData {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(AutopilotError::Config(format!(
                "reference data file {} not found",
                path
            )));
        }

        let raw = fs::read_to_string(path)?;
        let reference: ReferenceData = toml::from_str(&raw)?;
        reference.validate()?;

        o_info!(
            "📚 Loaded reference data: {} aircraft, {} hubs, {} airports",
            reference.aircraft.len(),
            reference.hubs.len(),
            reference.airports.len()
        );
        Ok(reference)
    }

    pub fn validate(&self) -> Result<()> {
        for model in &self.aircraft {
            if model.capacity == 0 {
                return Err(AutopilotError::Config(format!(
                    "aircraft {} has zero capacity",
                    model.short_name
                )));
            }
            if model.speed <= 0.0 || model.range <= 0.0 {
                return Err(AutopilotError::Config(format!(
                    "aircraft {} needs a positive speed and range",
                    model.short_name
                )));
            }
            if model.price <= 0 {
                return Err(AutopilotError::Config(format!(
                    "aircraft {} needs a positive price",
                    model.short_name
                )));
            }
        }
        Ok(())
    }

    /// Look up a catalog entry by its configured short name.
    pub fn model(&self, short_name: &str) -> Result<&AircraftModel> {
        self.aircraft
            .iter()
            .find(|m| m.short_name.eq_ignore_ascii_case(short_name))
            .ok_or_else(|| {
                AutopilotError::Config(format!("aircraft model '{}' not in catalog", short_name))
            })
    }

    pub fn airport(&self, iata: &str) -> Option<&Airport> {
        self.airports.iter().find(|a| a.iata.eq_ignore_ascii_case(iata))
    }

    pub fn hub(&self, iata: &str) -> Option<&Hub> {
        self.hubs.iter().find(|h| h.iata.eq_ignore_ascii_case(iata))
    }
}
