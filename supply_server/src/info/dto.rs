use chrono::{DateTime, Utc};
use serde::Serialize;
use supply_core::SupplySnapshot;
use supply_core::helpers::utils::{DISPLAY_DECIMALS, display_denom, format_atomics};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub apr: Option<f64>,
    pub bonded_ratio: Option<f64>,
    pub circulating_supply: String,
    pub community_pool: String,
    pub denom: String,
    pub total_staked: String,
    pub total_supply: String,
    pub locked_vesting: String,
    pub computed_at: DateTime<Utc>,
}

impl From<&SupplySnapshot> for Info {
    fn from(snapshot: &SupplySnapshot) -> Self {
        Info {
            apr: snapshot.apr,
            bonded_ratio: snapshot.bonded_ratio,
            circulating_supply: format_atomics(snapshot.circulating_supply, DISPLAY_DECIMALS),
            community_pool: format_atomics(snapshot.community_pool_amount, DISPLAY_DECIMALS),
            denom: display_denom(&snapshot.denom),
            total_staked: format_atomics(snapshot.total_staked, DISPLAY_DECIMALS),
            total_supply: format_atomics(snapshot.total_supply, DISPLAY_DECIMALS),
            locked_vesting: format_atomics(snapshot.locked_vesting, DISPLAY_DECIMALS),
            computed_at: snapshot.computed_at,
        }
    }
}
