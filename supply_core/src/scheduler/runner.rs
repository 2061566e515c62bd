use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::snapshot::builder::SupplyBuilder;

/// Refreshes the supply snapshot immediately and then every `interval` until shut down.
pub struct RefreshScheduler {
    shutdown: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn start(builder: Arc<SupplyBuilder>, interval: Duration) -> Self {
        let (tx, mut rx) = watch::channel(false);

        let worker = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // A tick that elapses while a refresh is still running is dropped, not queued.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let started = Instant::now();
                        match builder.refresh().await {
                            Ok(snapshot) => log::info!(
                                "Supply refresh completed in {:?}, circulating supply {}",
                                started.elapsed(),
                                snapshot.circulating_supply
                            ),
                            Err(e) => log::error!(
                                "Supply refresh failed after {:?}, keeping previous snapshot: {}",
                                started.elapsed(),
                                e
                            ),
                        }
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }

            log::info!("Supply refresh scheduler stopped");
        });

        Self {
            shutdown: tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    pub async fn shutdown(&self) {
        if self.shutdown.send(true).is_err() {
            return;
        }
        if let Some(handle) = self.worker.lock().await.take() {
            if let Err(e) = handle.await {
                log::warn!("Supply refresh worker exited with error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockChain;
    use crate::snapshot::store::SnapshotStore;
    use tempfile::TempDir;

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_immediately_then_on_interval() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path()).unwrap();
        let chain = Arc::new(MockChain::new("1000000", "100000", "400000", 0.10));
        let builder = Arc::new(SupplyBuilder::new(chain.clone(), store.clone(), "ujuno", vec![]));

        let scheduler = RefreshScheduler::start(builder, Duration::from_secs(3600));

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(*chain.supply_queries.lock().unwrap(), 1);
        assert_eq!(store.current().await.unwrap().circulating_supply, 900_000);

        time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(*chain.supply_queries.lock().unwrap(), 2);

        scheduler.shutdown().await;

        time::sleep(Duration::from_secs(7200)).await;
        assert_eq!(*chain.supply_queries.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_running() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path()).unwrap();
        let chain = Arc::new(MockChain::new("1000000", "100000", "400000", 0.10));
        chain.fail("inflation");
        let builder = Arc::new(SupplyBuilder::new(chain.clone(), store.clone(), "ujuno", vec![]));

        let scheduler = RefreshScheduler::start(builder, Duration::from_secs(60));

        time::sleep(Duration::from_secs(1)).await;
        assert!(store.current().await.is_none());

        chain.recover();
        time::sleep(Duration::from_secs(60)).await;
        assert!(store.current().await.is_some());

        scheduler.shutdown().await;
    }
}
