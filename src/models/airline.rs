use serde::{Deserialize, Serialize};
use std::fmt;

/// Reputation percentages shown on the airline overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reputation {
    pub passenger: u8,
    pub cargo: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcoStatus {
    Friendly,
    #[default]
    Neutral,
    Unfriendly,
}

/// Marketing campaigns the autopilot knows how to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignKind {
    AirlineReputation,
    CargoReputation,
    EcoFriendly,
}

impl fmt::Display for CampaignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignKind::AirlineReputation => f.write_str("airline reputation"),
            CampaignKind::CargoReputation => f.write_str("cargo reputation"),
            CampaignKind::EcoFriendly => f.write_str("eco-friendly"),
        }
    }
}
