use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{error::ErrorServer, info::dto::Info, state::ServerState};

#[utoipa::path(
    get,
    path = "/",
    description = "All supply metrics from the latest snapshot",
    responses(
        (status = 200, description = "Success", body = Info),
        (status = 503, description = "No refresh has completed yet"),
    )
)]
pub async fn info(State(server_state): State<Arc<ServerState>>) -> Result<Json<Info>, ErrorServer> {
    let snapshot = server_state.snapshot("Supply info").await?;

    Ok(Json(Info::from(snapshot.as_ref())))
}
