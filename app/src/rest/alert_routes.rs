use std::sync::Arc;

use sprout_core::Alert;
use warp::Filter;

use crate::engine::GrowObserver;
use crate::error::ObserverError;

use super::build_response;

pub fn routes(
    observer: &Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    alerts(observer.clone()).or(alert_count(observer.clone()))
}

/// GET /api/alerts
///
/// The full current alert list, rebuilt from the stores on every call
fn alerts(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "alerts"))
        .and_then(|observer: Arc<GrowObserver>| async move {
            let resp: Result<Vec<Alert>, ObserverError> = Ok(observer.alerts().await);
            build_response(resp)
        })
        .boxed()
}

/// GET /api/alerts/count
///
/// Returns an `AlertCountDto` for dashboard badges
fn alert_count(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "alerts" / "count"))
        .and_then(|observer: Arc<GrowObserver>| async move {
            let resp: Result<dto::AlertCountDto, ObserverError> = Ok(dto::AlertCountDto {
                count: observer.alert_count().await,
            });
            build_response(resp)
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct AlertCountDto {
        pub count: usize,
    }
}
