use std::{env, path::PathBuf, time::Duration};

use crate::error::{SupplyError, SupplyResult};

pub const DEFAULT_DENOM: &str = "ujuno";
pub const DEFAULT_INTERVAL_MS: u64 = 7_200_000;
pub const DEFAULT_DB_PATH: &str = "supply_db";
pub const DEFAULT_PORT: &str = "3000";

/// Startup configuration. Read once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SupplyConfig {
    pub rest_endpoint: String,
    pub account_endpoint: String,
    pub denom: String,
    pub interval: Duration,
    pub vesting_accounts: Vec<String>,
    pub db_path: PathBuf,
    pub server_domain: String,
}

impl SupplyConfig {
    pub fn from_env() -> SupplyResult<Self> {
        let rest_endpoint = env::var("REST_API_ENDPOINT")
            .map_err(|_| SupplyError::Config("REST_API_ENDPOINT environment variable not set".to_string()))?;
        let rest_endpoint = rest_endpoint.trim_end_matches('/').to_string();

        let account_endpoint = env::var("ACCOUNT_API_ENDPOINT")
            .map(|endpoint| endpoint.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| rest_endpoint.clone());

        let denom = env::var("DENOM").unwrap_or_else(|_| DEFAULT_DENOM.to_string());
        if denom.trim().is_empty() {
            return Err(SupplyError::Config("DENOM must not be empty".to_string()));
        }

        let interval = match env::var("INTERVAL") {
            Ok(raw) => parse_interval(&raw)?,
            Err(_) => Duration::from_millis(DEFAULT_INTERVAL_MS),
        };

        let vesting_accounts = env::var("VESTING_ACCOUNTS")
            .map(|raw| parse_vesting_accounts(&raw))
            .unwrap_or_default();

        let db_path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        let server_domain = env::var("SERVER_DOMAIN").unwrap_or_else(|_| {
            let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
            format!("0.0.0.0:{}", port)
        });

        Ok(Self {
            rest_endpoint,
            account_endpoint,
            denom,
            interval,
            vesting_accounts,
            db_path: PathBuf::from(db_path),
            server_domain,
        })
    }
}

fn parse_interval(raw: &str) -> SupplyResult<Duration> {
    let millis = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| SupplyError::Config(format!("INTERVAL must be milliseconds: {}", e)))?;

    if millis == 0 {
        return Err(SupplyError::Config("INTERVAL must be greater than zero".to_string()));
    }

    Ok(Duration::from_millis(millis))
}

fn parse_vesting_accounts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}
