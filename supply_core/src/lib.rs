//! Derives circulating supply, bonded ratio and staking APR for a Cosmos SDK
//! chain and keeps the latest figures available to readers.

pub mod chain;
pub mod config;
pub mod error;
pub mod helpers;
pub mod scheduler;
pub mod snapshot;
pub mod vesting;

pub use chain::handler::{ChainSource, LcdClient};
pub use config::SupplyConfig;
pub use error::{SupplyError, SupplyResult};
pub use scheduler::runner::RefreshScheduler;
pub use snapshot::builder::SupplyBuilder;
pub use snapshot::dto::{SupplySnapshot, SupplyView};
pub use snapshot::store::{SledPersistence, SnapshotStore, SupplyPersistence};
