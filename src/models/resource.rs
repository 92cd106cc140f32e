use serde::{Deserialize, Serialize};
use std::fmt;

/// Consumables bought on the game's commodity screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Fuel,
    Co2,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Fuel => "fuel",
            ResourceKind::Co2 => "co2 quota",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResourceKind::Fuel => "⛽",
            ResourceKind::Co2 => "🌱",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stock and market price of one resource, read fresh before every decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Price per 1000 units.
    pub price_unit: u64,
    pub capacity_free: u64,
    /// Units held. The CO2 quota goes negative when the fleet overdraws it.
    pub holding: i64,
}
