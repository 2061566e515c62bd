use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::dto::{Coin, CommunityPoolEntry, RawSupplyFigure, StakingPoolInfo};
use super::handler::ChainSource;
use crate::error::{SupplyError, SupplyResult};

#[derive(Debug, Clone, Default)]
pub(crate) struct MockChainState {
    pub supply: Vec<RawSupplyFigure>,
    pub community_pool: Vec<CommunityPoolEntry>,
    pub bonded_tokens: String,
    pub inflation: f64,
    pub accounts: HashMap<String, Vec<u8>>,
    pub failing_query: Option<&'static str>,
}

/// In-memory chain used to drive the builder and scheduler in tests.
#[derive(Default)]
pub(crate) struct MockChain {
    pub state: Mutex<MockChainState>,
    pub account_lookups: Mutex<Vec<String>>,
    pub supply_queries: Mutex<usize>,
}

impl MockChain {
    pub fn new(total_supply: &str, community_pool: &str, bonded_tokens: &str, inflation: f64) -> Self {
        let state = MockChainState {
            supply: vec![Coin::new("ibc/27394FB0", "777"), Coin::new("ujuno", total_supply)],
            community_pool: vec![Coin::new("ujuno", community_pool)],
            bonded_tokens: bonded_tokens.to_string(),
            inflation,
            ..Default::default()
        };

        Self {
            state: Mutex::new(state),
            ..Default::default()
        }
    }

    pub fn with_account(self, address: &str, record: serde_json::Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(address.to_string(), serde_json::to_vec(&record).unwrap());
        self
    }

    pub fn fail(&self, query: &'static str) {
        self.state.lock().unwrap().failing_query = Some(query);
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().failing_query = None;
    }

    fn check(&self, query: &str) -> SupplyResult<MockChainState> {
        let state = self.state.lock().unwrap().clone();
        if state.failing_query == Some(query) {
            return Err(SupplyError::ChainQuery {
                query: query.to_string(),
                status: 503,
                message: "node unavailable".to_string(),
            });
        }
        Ok(state)
    }
}

pub(crate) fn periodic_vesting(original: &str, delegated_free: &str) -> serde_json::Value {
    serde_json::json!({
        "@type": "/cosmos.vesting.v1beta1.PeriodicVestingAccount",
        "base_vesting_account": {
            "base_account": { "address": "juno1vesting" },
            "original_vesting": [{ "denom": "ujuno", "amount": original }],
            "delegated_free": [{ "denom": "ujuno", "amount": delegated_free }],
            "delegated_vesting": [],
            "end_time": "1735689600"
        },
        "start_time": "1640995200",
        "vesting_periods": []
    })
}

#[async_trait]
impl ChainSource for MockChain {
    async fn total_supply(&self) -> SupplyResult<Vec<RawSupplyFigure>> {
        *self.supply_queries.lock().unwrap() += 1;
        Ok(self.check("total_supply")?.supply)
    }

    async fn community_pool(&self) -> SupplyResult<Vec<CommunityPoolEntry>> {
        Ok(self.check("community_pool")?.community_pool)
    }

    async fn staking_pool(&self) -> SupplyResult<StakingPoolInfo> {
        let state = self.check("staking_pool")?;
        Ok(StakingPoolInfo {
            bonded_tokens: state.bonded_tokens,
            not_bonded_tokens: "0".to_string(),
        })
    }

    async fn inflation(&self) -> SupplyResult<f64> {
        Ok(self.check("inflation")?.inflation)
    }

    async fn account(&self, address: &str) -> SupplyResult<Vec<u8>> {
        self.account_lookups.lock().unwrap().push(address.to_string());
        let state = self.check("account")?;
        state
            .accounts
            .get(address)
            .cloned()
            .ok_or_else(|| SupplyError::AccountNotFound(address.to_string()))
    }
}
