use super::dto::{AccountRecord, BaseVestingAccount, VestingAccount};
use crate::chain::dto::Coin;
use crate::error::{SupplyError, SupplyResult};
use crate::helpers::utils::parse_amount;

/// Decodes a raw account record.
///
/// Returns `Ok(None)` for account types that are not vesting accounts. A
/// record that is not a well-formed account, or a vesting type whose payload
/// does not match its tag, is a `Decode` error.
pub fn decode_account(raw: &[u8]) -> SupplyResult<Option<VestingAccount>> {
    let record: AccountRecord =
        serde_json::from_slice(raw).map_err(|e| SupplyError::decode("account record", e))?;

    Ok(record.into_vesting())
}

fn sum_denom(coins: &[Coin], denom: &str) -> SupplyResult<u128> {
    coins
        .iter()
        .filter(|coin| coin.denom == denom)
        .try_fold(0u128, |total, coin| {
            let amount = parse_amount(&coin.amount)?;
            total
                .checked_add(amount)
                .ok_or_else(|| SupplyError::decode("vesting amount", "amount overflow"))
        })
}

impl BaseVestingAccount {
    /// `original_vesting - delegated_free` for `denom`, never below zero.
    pub fn locked_amount(&self, denom: &str) -> SupplyResult<u128> {
        let original = sum_denom(&self.original_vesting, denom)?;
        let delegated_free = sum_denom(&self.delegated_free, denom)?;

        Ok(original.saturating_sub(delegated_free))
    }
}

impl VestingAccount {
    pub fn locked_amount(&self, denom: &str) -> SupplyResult<u128> {
        self.base().locked_amount(denom)
    }
}
