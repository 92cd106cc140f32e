// Reputation and eco campaigns
use crate::client::GameClient;
use crate::config::CampaignConfig;
use crate::error::Result;
use crate::models::{CampaignKind, EcoStatus, Reputation};
use crate::{o_error, o_info, o_summary};

/// Campaigns that should be running given the current reputation and eco status.
pub fn due_campaigns(reputation: &Reputation, eco_status: EcoStatus, config: &CampaignConfig) -> Vec<CampaignKind> {
    let mut due = Vec::new();
    if !config.enabled {
        return due;
    }
    if reputation.passenger < config.min_passenger_reputation {
        due.push(CampaignKind::AirlineReputation);
    }
    if reputation.cargo < config.min_cargo_reputation {
        due.push(CampaignKind::CargoReputation);
    }
    if config.eco_friendly && eco_status != EcoStatus::Friendly {
        due.push(CampaignKind::EcoFriendly);
    }
    due
}

pub struct CampaignOperations<'a> {
    client: &'a dyn GameClient,
}

impl<'a> CampaignOperations<'a> {
    pub fn new(client: &'a dyn GameClient) -> Self {
        Self { client }
    }

    /// Start whatever is due. Returns the campaigns the game accepted.
    pub async fn run(&self, config: &CampaignConfig) -> Result<Vec<CampaignKind>> {
        if !config.enabled {
            return Ok(Vec::new());
        }

        let reputation = self.client.get_reputation().await?;
        let eco_status = self.client.get_eco_status().await?;
        o_info!(
            "📣 Reputation: pax {}%, cargo {}%, eco {:?}",
            reputation.passenger,
            reputation.cargo,
            eco_status
        );

        let mut started = Vec::new();
        for kind in due_campaigns(&reputation, eco_status, config) {
            match self.client.start_campaign(kind).await {
                Ok(()) => {
                    o_summary!("📣 Started {} campaign", kind);
                    started.push(kind);
                }
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => o_error!("❌ Could not start {} campaign: {}", kind, e),
            }
        }
        Ok(started)
    }
}
