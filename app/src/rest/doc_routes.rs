use utoipa::OpenApi;
use warp::Filter;

use crate::engine::{ZoneStatus, ZoneSummary};

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        sprout_core::Alert,
        sprout_core::Severity,
        sprout_core::ActuatorKind,
        sprout_core::CommandState,
        ZoneSummary,
        ZoneStatus,
        super::dto::HealthDto,
        super::dto::ErrorResponseDto,
        super::alert_routes::dto::AlertCountDto,
        super::actuator_routes::dto::ActuatorStateDto,
        super::actuator_routes::dto::ToggleRequestDto,
        super::actuator_routes::dto::ToggleResponseDto,
    )),
    tags((name = "sproutd", description = "Plant monitoring alert and zone aggregation API"))
)]
struct ApiDoc;

/// GET /api/doc/api.json
///
/// The OpenAPI document covering all route modules
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "doc" / "api.json")
        .and(warp::get())
        .map(|| warp::reply::json(&ApiDoc::openapi()))
        .boxed()
}
