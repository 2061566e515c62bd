use std::sync::Arc;

use axum::extract::State;
use supply_core::helpers::utils::{DISPLAY_DECIMALS, display_denom, format_atomics};

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/apr",
    description = "Staking APR as a fraction",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available or undefined"),
    )
)]
pub async fn apr(State(server_state): State<Arc<ServerState>>) -> Result<String, ErrorServer> {
    let snapshot = server_state.snapshot("APR").await?;

    snapshot
        .apr
        .map(|apr| apr.to_string())
        .ok_or_else(|| ErrorServer::unavailable("APR"))
}

#[utoipa::path(
    get,
    path = "/bonded-ratio",
    description = "Bonded tokens over total supply",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available or undefined"),
    )
)]
pub async fn bonded_ratio(State(server_state): State<Arc<ServerState>>) -> Result<String, ErrorServer> {
    let snapshot = server_state.snapshot("Bonded ratio").await?;

    snapshot
        .bonded_ratio
        .map(|bonded_ratio| bonded_ratio.to_string())
        .ok_or_else(|| ErrorServer::unavailable("Bonded ratio"))
}

/// Falls back to the persisted figure until the first refresh completes.
#[utoipa::path(
    get,
    path = "/circulating-supply",
    description = "Circulating supply in display units",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available"),
    )
)]
pub async fn circulating_supply(
    State(server_state): State<Arc<ServerState>>,
) -> Result<String, ErrorServer> {
    server_state
        .view()
        .await
        .circulating_supply()
        .map(|amount| format_atomics(amount, DISPLAY_DECIMALS))
        .ok_or_else(|| ErrorServer::unavailable("Circulating supply"))
}

#[utoipa::path(
    get,
    path = "/total-staked",
    description = "Bonded tokens in display units",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available"),
    )
)]
pub async fn total_staked(State(server_state): State<Arc<ServerState>>) -> Result<String, ErrorServer> {
    let snapshot = server_state.snapshot("Total staked").await?;

    Ok(format_atomics(snapshot.total_staked, DISPLAY_DECIMALS))
}

#[utoipa::path(
    get,
    path = "/total-supply",
    description = "Total supply in display units",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available"),
    )
)]
pub async fn total_supply(State(server_state): State<Arc<ServerState>>) -> Result<String, ErrorServer> {
    let snapshot = server_state.snapshot("Total supply").await?;

    Ok(format_atomics(snapshot.total_supply, DISPLAY_DECIMALS))
}

#[utoipa::path(
    get,
    path = "/community-pool",
    description = "Community pool balance in display units",
    responses(
        (status = 200, description = "Success", body = String),
        (status = 503, description = "Not yet available"),
    )
)]
pub async fn community_pool(
    State(server_state): State<Arc<ServerState>>,
) -> Result<String, ErrorServer> {
    let snapshot = server_state.snapshot("Community pool").await?;

    Ok(format_atomics(snapshot.community_pool_amount, DISPLAY_DECIMALS))
}

#[utoipa::path(
    get,
    path = "/denom",
    description = "Display name of the tracked denomination",
    responses((status = 200, description = "Success", body = String))
)]
pub async fn denom(State(server_state): State<Arc<ServerState>>) -> String {
    display_denom(server_state.denom())
}
