use crate::{info, metrics};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        metrics::handler::apr,
        metrics::handler::bonded_ratio,
        metrics::handler::circulating_supply,
        metrics::handler::total_staked,
        metrics::handler::total_supply,
        metrics::handler::community_pool,
        metrics::handler::denom,
    ),
    components(schemas(info::dto::Info))
)]
pub struct ApiDoc;
