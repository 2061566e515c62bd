use std::sync::Arc;

use chrono::{DateTime, Utc};

/// One consistent set of derived metrics. Amounts are in the smallest unit
/// of `denom`.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplySnapshot {
    pub denom: String,
    pub total_supply: u128,
    pub community_pool_amount: u128,
    pub locked_vesting: u128,
    pub circulating_supply: u128,
    pub total_staked: u128,
    /// `None` when total supply is zero.
    pub bonded_ratio: Option<f64>,
    /// `None` when the bonded ratio is undefined or zero.
    pub apr: Option<f64>,
    pub computed_at: DateTime<Utc>,
}

impl SupplySnapshot {
    pub fn staking_ratios(total_staked: u128, total_supply: u128, inflation: f64) -> (Option<f64>, Option<f64>) {
        if total_supply == 0 {
            return (None, None);
        }

        let bonded_ratio = total_staked as f64 / total_supply as f64;
        let apr = if bonded_ratio > 0.0 {
            Some(inflation / bonded_ratio)
        } else {
            None
        };

        (Some(bonded_ratio), apr)
    }
}

/// What the query interface can currently serve.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplyView {
    Live(Arc<SupplySnapshot>),
    /// No refresh has completed yet; only the persisted circulating supply is known.
    Seeded(u128),
    Unavailable,
}

impl SupplyView {
    pub fn into_snapshot(self) -> Option<Arc<SupplySnapshot>> {
        match self {
            SupplyView::Live(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn circulating_supply(&self) -> Option<u128> {
        match self {
            SupplyView::Live(snapshot) => Some(snapshot.circulating_supply),
            SupplyView::Seeded(circulating_supply) => Some(*circulating_supply),
            SupplyView::Unavailable => None,
        }
    }
}
