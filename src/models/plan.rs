use super::reference::Hub;
use super::route::RouteAllocation;

/// Routes bought at one hub during a planning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HubAllocation {
    pub hub: Hub,
    pub routes: Vec<RouteAllocation>,
}

/// How a planning pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionOutcome {
    /// Balance did not clear `price * safety_factor`. Nothing was bought.
    InsufficientFunds { balance: i64, required: f64 },
    /// The hangar is full. Nothing was bought.
    NoHangarSpace,
    /// Purchases were issued for as many routes as discovery could find.
    Completed,
}

/// Result of one fused plan-and-buy pass for a single aircraft model.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionPlan {
    pub model: String,
    /// Aircraft affordable when the pass began, after the hangar clamp.
    pub quantity: u32,
    pub per_hub: Vec<HubAllocation>,
    /// Purchase calls the game rejected. Each still counts against `quantity`.
    pub failed_purchases: u32,
    /// Aircraft left over once every hub had been visited.
    pub unplaced: u32,
    pub outcome: AcquisitionOutcome,
}

impl AcquisitionPlan {
    pub fn aborted(model: &str, outcome: AcquisitionOutcome) -> Self {
        Self {
            model: model.to_string(),
            quantity: 0,
            per_hub: Vec::new(),
            failed_purchases: 0,
            unplaced: 0,
            outcome,
        }
    }

    pub fn purchased(&self) -> usize {
        self.per_hub.iter().map(|h| h.routes.len()).sum()
    }

    pub fn route_names(&self) -> Vec<&str> {
        self.per_hub
            .iter()
            .flat_map(|h| h.routes.iter().map(|r| r.route_name.as_str()))
            .collect()
    }
}
