use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    metrics::handler::{
        apr, bonded_ratio, circulating_supply, community_pool, denom, total_staked, total_supply,
    },
    state::ServerState,
};

pub fn router(server_state: ServerState) -> Router {
    let state = Arc::new(server_state);

    let doc = ApiDoc::openapi();

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .route("/", get(info))
        .route("/apr", get(apr))
        .route("/bonded-ratio", get(bonded_ratio))
        .route("/circulating-supply", get(circulating_supply))
        .route("/total-staked", get(total_staked))
        .route("/total-supply", get(total_supply))
        .route("/community-pool", get(community_pool))
        .route("/denom", get(denom))
        .route("/docs", get(api_docs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use supply_core::chain::dto::{Coin, CommunityPoolEntry, RawSupplyFigure, StakingPoolInfo};
    use supply_core::{ChainSource, SnapshotStore, SupplyBuilder, SupplyError, SupplyResult};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct StaticChain;

    #[async_trait]
    impl ChainSource for StaticChain {
        async fn total_supply(&self) -> SupplyResult<Vec<RawSupplyFigure>> {
            Ok(vec![Coin::new("ujuno", "1000000")])
        }

        async fn community_pool(&self) -> SupplyResult<Vec<CommunityPoolEntry>> {
            Ok(vec![Coin::new("ujuno", "100000.000000000000000000")])
        }

        async fn staking_pool(&self) -> SupplyResult<StakingPoolInfo> {
            Ok(StakingPoolInfo {
                bonded_tokens: "400000".to_string(),
                not_bonded_tokens: "0".to_string(),
            })
        }

        async fn inflation(&self) -> SupplyResult<f64> {
            Ok(0.1)
        }

        async fn account(&self, address: &str) -> SupplyResult<Vec<u8>> {
            if address != "juno1vesting" {
                return Err(SupplyError::AccountNotFound(address.to_string()));
            }
            Ok(serde_json::to_vec(&serde_json::json!({
                "@type": "/cosmos.vesting.v1beta1.ContinuousVestingAccount",
                "base_vesting_account": {
                    "original_vesting": [{ "denom": "ujuno", "amount": "50000" }],
                    "delegated_free": [{ "denom": "ujuno", "amount": "10000" }]
                },
                "start_time": "1640995200"
            }))
            .unwrap())
        }
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn refreshed_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path()).unwrap();
        let builder = SupplyBuilder::new(
            Arc::new(StaticChain),
            store.clone(),
            "ujuno",
            vec!["juno1vesting".to_string(), "juno1unknown".to_string()],
        );
        builder.refresh().await.unwrap();

        (router(ServerState::from((store, "ujuno".to_string()))), temp_dir)
    }

    #[tokio::test]
    async fn test_metric_routes() {
        let (app, _temp) = refreshed_app().await;

        assert_eq!(get(&app, "/circulating-supply").await, (StatusCode::OK, "0.86".to_string()));
        assert_eq!(get(&app, "/total-supply").await, (StatusCode::OK, "1".to_string()));
        assert_eq!(get(&app, "/community-pool").await, (StatusCode::OK, "0.1".to_string()));
        assert_eq!(get(&app, "/total-staked").await, (StatusCode::OK, "0.4".to_string()));
        assert_eq!(get(&app, "/denom").await, (StatusCode::OK, "JUNO".to_string()));

        let (status, bonded_ratio) = get(&app, "/bonded-ratio").await;
        assert_eq!(status, StatusCode::OK);
        assert!((bonded_ratio.parse::<f64>().unwrap() - 0.4).abs() < 1e-12);

        let (status, apr) = get(&app, "/apr").await;
        assert_eq!(status, StatusCode::OK);
        assert!((apr.parse::<f64>().unwrap() - 0.25).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_info_route() {
        let (app, _temp) = refreshed_app().await;

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);

        let info: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(info["circulatingSupply"], "0.86");
        assert_eq!(info["communityPool"], "0.1");
        assert_eq!(info["totalSupply"], "1");
        assert_eq!(info["totalStaked"], "0.4");
        assert_eq!(info["lockedVesting"], "0.04");
        assert_eq!(info["denom"], "JUNO");
        assert!(info["computedAt"].is_string());
    }

    #[tokio::test]
    async fn test_routes_before_first_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path()).unwrap();
        let app = router(ServerState::from((store, "ujuno".to_string())));

        for uri in ["/", "/apr", "/bonded-ratio", "/circulating-supply", "/total-supply"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
            assert!(body.contains("not yet available"));
        }

        assert_eq!(get(&app, "/denom").await, (StatusCode::OK, "JUNO".to_string()));
    }

    #[tokio::test]
    async fn test_persisted_circulating_supply_served_before_first_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let db = sled::open(temp_dir.path()).unwrap();
        SnapshotStore::new(db.clone())
            .persist_circulating_supply(860_000)
            .unwrap();

        let app = router(ServerState::from((SnapshotStore::new(db), "ujuno".to_string())));

        assert_eq!(get(&app, "/circulating-supply").await, (StatusCode::OK, "0.86".to_string()));
        assert_eq!(get(&app, "/total-supply").await.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_docs_route() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::open(temp_dir.path()).unwrap();
        let app = router(ServerState::from((store, "ujuno".to_string())));

        let (status, body) = get(&app, "/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/circulating-supply"));
    }
}
