use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::dto::SupplySnapshot;
use super::store::SnapshotStore;
use crate::chain::dto::Coin;
use crate::chain::handler::ChainSource;
use crate::config::SupplyConfig;
use crate::error::{SupplyError, SupplyResult};
use crate::helpers::utils::parse_amount;
use crate::vesting::handler::decode_account;

/// Runs refresh cycles: fetch chain state, derive metrics, publish the snapshot.
pub struct SupplyBuilder {
    chain: Arc<dyn ChainSource>,
    store: SnapshotStore,
    denom: String,
    vesting_accounts: Vec<String>,
    // Held for the whole cycle so two refreshes never interleave their writes.
    refresh_lock: Mutex<()>,
}

impl SupplyBuilder {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        store: SnapshotStore,
        denom: &str,
        vesting_accounts: Vec<String>,
    ) -> Self {
        Self {
            chain,
            store,
            denom: denom.to_string(),
            vesting_accounts,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn from_config(chain: Arc<dyn ChainSource>, store: SnapshotStore, config: &SupplyConfig) -> Self {
        Self::new(chain, store, &config.denom, config.vesting_accounts.clone())
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// One refresh cycle. On error the previously published snapshot is left untouched.
    pub async fn refresh(&self) -> SupplyResult<Arc<SupplySnapshot>> {
        let _guard = self.refresh_lock.lock().await;

        match self.store.load_persisted_circulating_supply() {
            Ok(Some(circulating_supply)) => {
                log::info!("Loaded circulating supply: {}", circulating_supply);
                self.store.seed(circulating_supply).await;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Failed to load persisted circulating supply: {}", e),
        }

        log::info!("Updating supply info {}", Utc::now());

        let snapshot = self.build_snapshot().await?;
        let snapshot = self.store.replace(snapshot).await;
        log::info!("Circulating supply: {}", snapshot.circulating_supply);

        match self.store.persist_circulating_supply(snapshot.circulating_supply) {
            Ok(()) => log::info!("Circulating supply saved"),
            Err(e) => log::error!("Failed to persist circulating supply: {}", e),
        }

        Ok(snapshot)
    }

    async fn build_snapshot(&self) -> SupplyResult<SupplySnapshot> {
        let (supply, community_pool, staking_pool, inflation) = tokio::try_join!(
            self.chain.total_supply(),
            self.chain.community_pool(),
            self.chain.staking_pool(),
            self.chain.inflation(),
        )?;

        let total_supply = denom_amount(&supply, &self.denom)?;
        log::info!("Total supply: {}", total_supply);

        let community_pool_amount = denom_amount(&community_pool, &self.denom)?;
        log::info!("Community pool: {}", community_pool_amount);

        let total_staked = parse_amount(&staking_pool.bonded_tokens)?;
        let (bonded_ratio, apr) = SupplySnapshot::staking_ratios(total_staked, total_supply, inflation);
        log::info!("Total staked: {}", total_staked);
        log::info!("Bonded ratio: {:?}", bonded_ratio);
        log::info!("APR: {:?}", apr);

        let provisional = total_supply.checked_sub(community_pool_amount).ok_or_else(|| {
            SupplyError::Inconsistent(format!(
                "community pool {} exceeds total supply {}",
                community_pool_amount, total_supply
            ))
        })?;

        let locked_vesting = self.locked_vesting().await?;

        let circulating_supply = provisional.checked_sub(locked_vesting).ok_or_else(|| {
            SupplyError::Inconsistent(format!(
                "locked vesting {} exceeds provisional circulating supply {}",
                locked_vesting, provisional
            ))
        })?;

        Ok(SupplySnapshot {
            denom: self.denom.clone(),
            total_supply,
            community_pool_amount,
            locked_vesting,
            circulating_supply,
            total_staked,
            bonded_ratio,
            apr,
            computed_at: Utc::now(),
        })
    }

    /// Sums locked balances of the tracked vesting accounts, one account at a time in listed order.
    async fn locked_vesting(&self) -> SupplyResult<u128> {
        let total = self.vesting_accounts.len();
        let mut locked = 0u128;

        for (index, address) in self.vesting_accounts.iter().enumerate() {
            let amount = self.account_locked_amount(address).await?;

            locked = locked.checked_add(amount).ok_or_else(|| {
                SupplyError::decode(format!("account {}", address), "locked vesting overflow")
            })?;

            log::info!("Vesting accounts processed {}/{}", index + 1, total);
        }

        Ok(locked)
    }

    async fn account_locked_amount(&self, address: &str) -> SupplyResult<u128> {
        let raw = match self.chain.account(address).await {
            Ok(raw) => raw,
            Err(SupplyError::AccountNotFound(_)) => {
                log::info!("Vesting account {} has no on-chain account", address);
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let account = decode_account(&raw).map_err(|e| with_address(e, address))?;

        match account {
            Some(account) => {
                let locked = account
                    .locked_amount(&self.denom)
                    .map_err(|e| with_address(e, address))?;
                log::debug!("{} ({}) locked: {}", address, account.type_url(), locked);
                Ok(locked)
            }
            None => {
                log::info!("Account {} is not a vesting account", address);
                Ok(0)
            }
        }
    }
}

fn denom_amount(coins: &[Coin], denom: &str) -> SupplyResult<u128> {
    match coins.iter().find(|coin| coin.denom == denom) {
        Some(coin) => parse_amount(&coin.amount),
        None => Ok(0),
    }
}

fn with_address(err: SupplyError, address: &str) -> SupplyError {
    match err {
        SupplyError::Decode { context, message } => SupplyError::Decode {
            context: format!("{} for account {}", context, address),
            message,
        },
        other => other,
    }
}
