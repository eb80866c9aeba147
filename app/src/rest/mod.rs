use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::Filter;

use crate::config::CONFIG;
use crate::engine::GrowObserver;
use crate::error::ObserverError;

mod actuator_routes;
mod alert_routes;
mod doc_routes;
mod zone_routes;

pub fn routes(
    observer: &Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    alert_routes::routes(observer)
        .or(zone_routes::routes(observer))
        .or(actuator_routes::routes(observer))
        .or(health(observer.clone()))
        .or(doc_routes::routes())
}

/// GET /api/health
///
/// Store reachability and the configured zone count
fn health(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "health"))
        .and_then(|observer: Arc<GrowObserver>| async move {
            let database_state = observer.store_state().await;
            let resp: Result<dto::HealthDto, ObserverError> = Ok(dto::HealthDto {
                healthy: database_state == "connected",
                database_state: database_state.to_owned(),
                zones: observer.settings.zones.len(),
                version: sprout_core::CORE_VERSION.to_owned(),
            });
            build_response(resp)
        })
        .boxed()
}

pub(crate) fn build_response<T: Serialize>(
    resp: Result<T, ObserverError>,
) -> Result<Box<dyn warp::Reply>, warp::Rejection> {
    match resp {
        Ok(data) => Ok(Box::new(warp::reply::json(&data))),
        Err(ObserverError::User(err)) => {
            warn!("{}", err);
            let body = warp::reply::json(&dto::ErrorResponseDto {
                error: format!("{}", err),
            });
            Ok(Box::new(warp::reply::with_status(
                body,
                StatusCode::BAD_REQUEST,
            )))
        }
        Err(ObserverError::Internal(err)) => {
            error!("{}", err);
            let body = warp::reply::json(&dto::ErrorResponseDto {
                error: format!("{}", err),
            });
            Ok(Box::new(warp::reply::with_status(
                body,
                StatusCode::INTERNAL_SERVER_ERROR,
            )))
        }
    }
}

pub async fn dispatch_server_daemon(observer: Arc<GrowObserver>) {
    let bind_addr: SocketAddr = CONFIG
        .bind_addr()
        .parse()
        .expect("BIND_ADDR must be a valid socket address");

    info!("Starting webserver at: {}", bind_addr);
    warp::serve(routes(&observer)).run(bind_addr).await;
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ErrorResponseDto {
        pub error: String,
    }

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct HealthDto {
        pub healthy: bool,
        pub database_state: String,
        pub zones: usize,
        pub version: String,
    }
}
