use std::sync::Arc;

use supply_core::{SnapshotStore, SupplySnapshot, SupplyView};

use crate::error::ErrorServer;

#[derive(Clone)]
pub struct ServerState {
    store: SnapshotStore,
    denom: String,
}

impl From<(SnapshotStore, String)> for ServerState {
    fn from(states: (SnapshotStore, String)) -> Self {
        let (store, denom) = states;
        Self { store, denom }
    }
}

impl ServerState {
    pub fn denom(&self) -> &str {
        &self.denom
    }

    pub async fn view(&self) -> SupplyView {
        self.store.view().await
    }

    /// The live snapshot, or a 503 naming `what` was asked for.
    pub async fn snapshot(&self, what: &str) -> Result<Arc<SupplySnapshot>, ErrorServer> {
        self.view()
            .await
            .into_snapshot()
            .ok_or_else(|| ErrorServer::unavailable(what))
    }
}
