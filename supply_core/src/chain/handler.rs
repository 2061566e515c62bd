use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::dto::{
    AccountResponse, ChainErrorBody, CommunityPoolEntry, CommunityPoolResponse,
    InflationResponse, RawSupplyFigure, StakingPoolInfo, StakingPoolResponse, SupplyPage,
};
use crate::config::SupplyConfig;
use crate::error::{SupplyError, SupplyResult};
use crate::helpers::utils::parse_rate;

pub const SUPPLY_PAGE_LIMIT: u32 = 10_000;
pub const MAX_SUPPLY_PAGES: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GRPC_NOT_FOUND: i64 = 5;

/// Read-only view of the chain the supply figures are derived from.
#[async_trait]
pub trait ChainSource: Send + Sync {
    async fn total_supply(&self) -> SupplyResult<Vec<RawSupplyFigure>>;

    async fn community_pool(&self) -> SupplyResult<Vec<CommunityPoolEntry>>;

    async fn staking_pool(&self) -> SupplyResult<StakingPoolInfo>;

    /// Annual inflation as a fraction.
    async fn inflation(&self) -> SupplyResult<f64>;

    /// Raw account record, type tag included. Missing accounts are `AccountNotFound`.
    async fn account(&self, address: &str) -> SupplyResult<Vec<u8>>;
}

#[derive(Clone)]
pub struct LcdClient {
    client: Client,
    rest_endpoint: String,
    account_endpoint: String,
}

impl LcdClient {
    pub fn new(rest_endpoint: &str, account_endpoint: &str) -> SupplyResult<Self> {
        let client = Client::builder()
            .user_agent("supply-metrics/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SupplyError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_endpoint: rest_endpoint.trim_end_matches('/').to_string(),
            account_endpoint: account_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &SupplyConfig) -> SupplyResult<Self> {
        Self::new(&config.rest_endpoint, &config.account_endpoint)
    }

    async fn fetch(
        &self,
        query: &str,
        url: &str,
        params: &[(&str, String)],
    ) -> SupplyResult<(StatusCode, Vec<u8>)> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| SupplyError::network(query, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SupplyError::network(query, e))?;

        Ok((status, body.to_vec()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &str,
        url: &str,
        params: &[(&str, String)],
    ) -> SupplyResult<T> {
        let (status, body) = self.fetch(query, url, params).await?;

        if !status.is_success() {
            return Err(chain_query_error(query, status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| SupplyError::decode(query, e))
    }
}

fn chain_query_error(query: &str, status: StatusCode, body: &[u8]) -> SupplyError {
    let message = serde_json::from_slice::<ChainErrorBody>(body)
        .ok()
        .and_then(|error| error.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    SupplyError::ChainQuery {
        query: query.to_string(),
        status: status.as_u16(),
        message,
    }
}

fn is_not_found(status: StatusCode, body: &[u8]) -> bool {
    if status == StatusCode::NOT_FOUND {
        return true;
    }

    serde_json::from_slice::<ChainErrorBody>(body)
        .map(|error| error.code == Some(GRPC_NOT_FOUND))
        .unwrap_or(false)
}

#[async_trait]
impl ChainSource for LcdClient {
    async fn total_supply(&self) -> SupplyResult<Vec<RawSupplyFigure>> {
        let url = format!("{}/cosmos/bank/v1beta1/supply", self.rest_endpoint);
        let mut supply = Vec::new();
        let mut next_key: Option<String> = None;

        for _ in 0..MAX_SUPPLY_PAGES {
            let mut params = vec![("pagination.limit", SUPPLY_PAGE_LIMIT.to_string())];
            if let Some(key) = next_key.take() {
                params.push(("pagination.key", key));
            }

            let page: SupplyPage = self.get_json("total_supply", &url, &params).await?;
            supply.extend(page.supply);

            match page.pagination.and_then(|p| p.next_key) {
                Some(key) if !key.is_empty() => next_key = Some(key),
                _ => return Ok(supply),
            }
        }

        Err(SupplyError::ChainQuery {
            query: "total_supply".to_string(),
            status: StatusCode::OK.as_u16(),
            message: format!("supply pagination exceeded {} pages", MAX_SUPPLY_PAGES),
        })
    }

    async fn community_pool(&self) -> SupplyResult<Vec<CommunityPoolEntry>> {
        let url = format!("{}/cosmos/distribution/v1beta1/community_pool", self.rest_endpoint);
        let response: CommunityPoolResponse = self.get_json("community_pool", &url, &[]).await?;
        Ok(response.pool)
    }

    async fn staking_pool(&self) -> SupplyResult<StakingPoolInfo> {
        let url = format!("{}/cosmos/staking/v1beta1/pool", self.rest_endpoint);
        let response: StakingPoolResponse = self.get_json("staking_pool", &url, &[]).await?;
        Ok(response.pool)
    }

    async fn inflation(&self) -> SupplyResult<f64> {
        let url = format!("{}/cosmos/mint/v1beta1/inflation", self.rest_endpoint);
        let response: InflationResponse = self.get_json("inflation", &url, &[]).await?;
        parse_rate(&response.inflation)
    }

    async fn account(&self, address: &str) -> SupplyResult<Vec<u8>> {
        let url = format!("{}/cosmos/auth/v1beta1/accounts/{}", self.account_endpoint, address);
        let query = format!("account {}", address);

        let (status, body) = self.fetch(&query, &url, &[]).await?;

        if !status.is_success() {
            if is_not_found(status, &body) {
                return Err(SupplyError::AccountNotFound(address.to_string()));
            }
            return Err(chain_query_error(&query, status, &body));
        }

        let response: AccountResponse =
            serde_json::from_slice(&body).map_err(|e| SupplyError::decode(&query, e))?;

        serde_json::to_vec(&response.account).map_err(|e| SupplyError::decode(query, e))
    }
}
