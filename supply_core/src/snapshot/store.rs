use std::path::Path;
use std::sync::Arc;

use sled::{Db, Tree};
use tokio::sync::RwLock;

use super::dto::{SupplySnapshot, SupplyView};
use crate::error::{SupplyError, SupplyResult};

const SUPPLY_TREE: &str = "supply";
pub(crate) const CIRCULATING_SUPPLY_KEY: &str = "circulating_supply";

/// Durable home of the circulating-supply figure.
pub trait SupplyPersistence: Send + Sync {
    fn load(&self) -> SupplyResult<Option<u128>>;
    fn save(&self, circulating_supply: u128) -> SupplyResult<()>;
}

/// Keeps the figure as a UTF-8 integer string in the `supply` tree of a sled database.
pub struct SledPersistence {
    db: Db,
}

impl SledPersistence {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) fn supply_tree(&self) -> SupplyResult<Tree> {
        Ok(self.db.open_tree(SUPPLY_TREE)?)
    }
}

impl SupplyPersistence for SledPersistence {
    fn load(&self) -> SupplyResult<Option<u128>> {
        let tree = self.supply_tree()?;

        match tree.get(CIRCULATING_SUPPLY_KEY)? {
            Some(bytes) => {
                let raw = String::from_utf8_lossy(&bytes);
                let value = raw.trim().parse::<u128>().map_err(|e| {
                    SupplyError::Persistence(format!("Invalid persisted circulating supply {:?}: {}", raw, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn save(&self, circulating_supply: u128) -> SupplyResult<()> {
        let tree = self.supply_tree()?;
        tree.insert(CIRCULATING_SUPPLY_KEY, circulating_supply.to_string().as_bytes())?;
        tree.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StoreState {
    snapshot: Option<Arc<SupplySnapshot>>,
    seed: Option<u128>,
}

/// Latest snapshot plus the durable circulating-supply figure.
#[derive(Clone)]
pub struct SnapshotStore {
    persistence: Arc<dyn SupplyPersistence>,
    state: Arc<RwLock<StoreState>>,
}

impl SnapshotStore {
    pub fn open(path: impl AsRef<Path>) -> SupplyResult<Self> {
        let db = sled::open(path)?;
        Ok(Self::new(db))
    }

    pub fn new(db: Db) -> Self {
        Self::with_persistence(Arc::new(SledPersistence::new(db)))
    }

    /// Seeds the store with the previously persisted value, if any.
    pub fn with_persistence(persistence: Arc<dyn SupplyPersistence>) -> Self {
        let seed = read_seed(persistence.as_ref());

        Self {
            persistence,
            state: Arc::new(RwLock::new(StoreState { snapshot: None, seed })),
        }
    }

    pub async fn current(&self) -> Option<Arc<SupplySnapshot>> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn view(&self) -> SupplyView {
        let state = self.state.read().await;

        match (&state.snapshot, state.seed) {
            (Some(snapshot), _) => SupplyView::Live(Arc::clone(snapshot)),
            (None, Some(seed)) => SupplyView::Seeded(seed),
            (None, None) => SupplyView::Unavailable,
        }
    }

    /// Installs `snapshot` as the live one. Readers see either the old or the new value whole.
    pub(crate) async fn replace(&self, snapshot: SupplySnapshot) -> Arc<SupplySnapshot> {
        let snapshot = Arc::new(snapshot);
        self.state.write().await.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub(crate) async fn seed(&self, circulating_supply: u128) {
        self.state.write().await.seed = Some(circulating_supply);
    }

    pub fn load_persisted_circulating_supply(&self) -> SupplyResult<Option<u128>> {
        self.persistence.load()
    }

    pub fn persist_circulating_supply(&self, circulating_supply: u128) -> SupplyResult<()> {
        self.persistence.save(circulating_supply)
    }
}

fn read_seed(persistence: &dyn SupplyPersistence) -> Option<u128> {
    match persistence.load() {
        Ok(Some(circulating_supply)) => {
            log::info!("Loaded circulating supply: {}", circulating_supply);
            Some(circulating_supply)
        }
        Ok(None) => {
            log::info!("No persisted circulating supply found");
            None
        }
        Err(e) => {
            log::warn!("Failed to load persisted circulating supply: {}", e);
            None
        }
    }
}
