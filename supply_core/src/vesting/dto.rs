use serde::{Deserialize, Serialize};

use crate::chain::dto::Coin;

pub const CONTINUOUS_VESTING_TYPE: &str = "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
pub const DELAYED_VESTING_TYPE: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";
pub const PERIODIC_VESTING_TYPE: &str = "/cosmos.vesting.v1beta1.PeriodicVestingAccount";

/// Fields shared by every vesting account variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseVestingAccount {
    pub original_vesting: Vec<Coin>,
    #[serde(default)]
    pub delegated_free: Vec<Coin>,
    #[serde(default)]
    pub delegated_vesting: Vec<Coin>,
    #[serde(default)]
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousVestingAccount {
    pub base_vesting_account: BaseVestingAccount,
    #[serde(default)]
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedVestingAccount {
    pub base_vesting_account: BaseVestingAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingPeriod {
    pub length: String,
    pub amount: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicVestingAccount {
    pub base_vesting_account: BaseVestingAccount,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub vesting_periods: Vec<VestingPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VestingAccount {
    Continuous(ContinuousVestingAccount),
    Delayed(DelayedVestingAccount),
    Periodic(PeriodicVestingAccount),
}

/// Account record as returned by the auth module, dispatched on its type tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "@type")]
pub(crate) enum AccountRecord {
    #[serde(rename = "/cosmos.vesting.v1beta1.ContinuousVestingAccount")]
    Continuous(ContinuousVestingAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.DelayedVestingAccount")]
    Delayed(DelayedVestingAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.PeriodicVestingAccount")]
    Periodic(PeriodicVestingAccount),
    #[serde(other)]
    NonVesting,
}

impl AccountRecord {
    pub(crate) fn into_vesting(self) -> Option<VestingAccount> {
        match self {
            AccountRecord::Continuous(account) => Some(VestingAccount::Continuous(account)),
            AccountRecord::Delayed(account) => Some(VestingAccount::Delayed(account)),
            AccountRecord::Periodic(account) => Some(VestingAccount::Periodic(account)),
            AccountRecord::NonVesting => None,
        }
    }
}

impl VestingAccount {
    pub fn base(&self) -> &BaseVestingAccount {
        match self {
            VestingAccount::Continuous(account) => &account.base_vesting_account,
            VestingAccount::Delayed(account) => &account.base_vesting_account,
            VestingAccount::Periodic(account) => &account.base_vesting_account,
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            VestingAccount::Continuous(_) => CONTINUOUS_VESTING_TYPE,
            VestingAccount::Delayed(_) => DELAYED_VESTING_TYPE,
            VestingAccount::Periodic(_) => PERIODIC_VESTING_TYPE,
        }
    }
}
