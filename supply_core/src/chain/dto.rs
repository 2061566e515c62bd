use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: &str, amount: &str) -> Self {
        Self {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }
    }
}

/// One entry of the bank total-supply query.
pub type RawSupplyFigure = Coin;

/// One entry of the distribution community pool (a `DecCoin`).
pub type CommunityPoolEntry = Coin;

#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    pub next_key: Option<String>,
    pub total: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplyPage {
    pub supply: Vec<RawSupplyFigure>,
    pub pagination: Option<PageResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityPoolResponse {
    pub pool: Vec<CommunityPoolEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPoolInfo {
    pub bonded_tokens: String,
    #[serde(default)]
    pub not_bonded_tokens: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakingPoolResponse {
    pub pool: StakingPoolInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InflationResponse {
    pub inflation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub account: serde_json::Value,
}

/// Error body returned by the LCD gateway for failed queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}
