// Fuel and CO2 quota replenishment
use crate::client::GameClient;
use crate::config::ResourcePolicyConfig;
use crate::error::Result;
use crate::models::{ResourceKind, ResourceState};
use crate::{o_info, o_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseReason {
    /// Price under the immediate threshold: fill every free unit.
    FillToCapacity,
    /// Stock under the floor and price under the low-level threshold: top up to the floor.
    TopUpToFloor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    PriceTooHigh,
    /// A branch fired but there was nothing to buy, or not enough cash for a single unit.
    NothingToBuy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseDecision {
    Buy {
        quantity: u64,
        reason: PurchaseReason,
        limited_by_balance: bool,
    },
    Skip(SkipReason),
}

impl PurchaseDecision {
    pub fn quantity(&self) -> u64 {
        match self {
            PurchaseDecision::Buy { quantity, .. } => *quantity,
            PurchaseDecision::Skip(_) => 0,
        }
    }
}

/// Pick the branch and its target quantity. First match wins.
pub fn select_target(state: &ResourceState, policy: &ResourcePolicyConfig) -> Option<(u64, PurchaseReason)> {
    if state.price_unit < policy.immediate_threshold {
        return Some((state.capacity_free, PurchaseReason::FillToCapacity));
    }

    let holding = state.holding.max(0) as u64;
    if holding < policy.low_level_floor && state.price_unit < policy.low_level_threshold {
        return Some((policy.low_level_floor - holding, PurchaseReason::TopUpToFloor));
    }

    None
}

/// Units actually bought for `target` at `price_unit` per 1000, and whether cash was the limit.
pub fn clamp_to_balance(target: u64, price_unit: u64, balance: i64) -> (u64, bool) {
    if price_unit == 0 {
        return (target, false);
    }

    let balance = balance.max(0) as u128;
    // (target * price) / 1000 <= balance, kept in integers
    if target as u128 * price_unit as u128 <= balance * 1000 {
        (target, false)
    } else {
        let affordable = (balance * 1000 / price_unit as u128).min(u64::MAX as u128) as u64;
        (affordable, true)
    }
}

pub fn decide_purchase(state: &ResourceState, policy: &ResourcePolicyConfig, balance: i64) -> PurchaseDecision {
    match select_target(state, policy) {
        None => PurchaseDecision::Skip(SkipReason::PriceTooHigh),
        Some((target, reason)) => finish_decision(target, reason, state.price_unit, balance),
    }
}

fn finish_decision(target: u64, reason: PurchaseReason, price_unit: u64, balance: i64) -> PurchaseDecision {
    let (quantity, limited_by_balance) = clamp_to_balance(target, price_unit, balance);
    if quantity == 0 {
        return PurchaseDecision::Skip(SkipReason::NothingToBuy);
    }
    PurchaseDecision::Buy {
        quantity,
        reason,
        limited_by_balance,
    }
}

pub struct ResourceOperations<'a> {
    client: &'a dyn GameClient,
}

impl<'a> ResourceOperations<'a> {
    pub fn new(client: &'a dyn GameClient) -> Self {
        Self { client }
    }

    /// Read the resource, decide, and issue at most one purchase.
    /// The balance is only fetched once a branch has selected a target.
    pub async fn replenish(&self, kind: ResourceKind, policy: &ResourcePolicyConfig) -> Result<PurchaseDecision> {
        let state = self.client.get_resource_state(kind).await?;
        o_info!(
            "{} {}: holding {}, free capacity {}, price ${}",
            kind.icon(),
            kind,
            state.holding,
            state.capacity_free,
            state.price_unit
        );

        let decision = match select_target(&state, policy) {
            None => PurchaseDecision::Skip(SkipReason::PriceTooHigh),
            Some((target, reason)) => {
                let balance = self.client.get_balance().await?;
                finish_decision(target, reason, state.price_unit, balance)
            }
        };

        match decision {
            PurchaseDecision::Buy { quantity, reason, limited_by_balance } => {
                self.client.buy_resource(kind, quantity).await?;
                let why = match reason {
                    PurchaseReason::FillToCapacity => "filling to capacity",
                    PurchaseReason::TopUpToFloor => "topping up to floor",
                };
                o_summary!(
                    "{} Bought {} {} at ${} ({}{})",
                    kind.icon(),
                    quantity,
                    kind,
                    state.price_unit,
                    why,
                    if limited_by_balance { ", limited by balance" } else { "" }
                );
            }
            PurchaseDecision::Skip(SkipReason::PriceTooHigh) => {
                o_summary!("{} {} price ${} is too high to buy", kind.icon(), kind, state.price_unit);
            }
            PurchaseDecision::Skip(SkipReason::NothingToBuy) => {
                o_summary!("{} No {} bought: nothing to fill or no cash", kind.icon(), kind);
            }
        }

        Ok(decision)
    }
}
