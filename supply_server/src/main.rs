mod docs;
mod error;
mod info;
mod metrics;
mod router;
mod state;

use std::sync::Arc;

use dotenvy::dotenv;
use router::router;
use state::ServerState;
use supply_core::{LcdClient, RefreshScheduler, SnapshotStore, SupplyBuilder, SupplyConfig};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = SupplyConfig::from_env()?;
    log::info!(
        "Tracking {} with {} vesting accounts, refreshing every {:?}",
        config.denom,
        config.vesting_accounts.len(),
        config.interval
    );

    let store = SnapshotStore::open(&config.db_path)?;
    let chain = Arc::new(LcdClient::from_config(&config)?);
    let builder = Arc::new(SupplyBuilder::from_config(chain, store.clone(), &config));
    let scheduler = RefreshScheduler::start(builder, config.interval);

    let app = router(ServerState::from((store, config.denom.clone())));

    let listener = tokio::net::TcpListener::bind(&config.server_domain).await?;
    log::info!("Supply server listening at http://{}", config.server_domain);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}
