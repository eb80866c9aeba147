use std::sync::Arc;

use warp::Filter;

use crate::engine::{GrowObserver, ZoneSummary};
use crate::error::ObserverError;

use super::build_response;

pub fn routes(
    observer: &Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    zones(observer.clone()).or(zone(observer.clone()))
}

/// GET /api/zones
///
/// One summary per configured zone, in configuration order
fn zones(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "zones"))
        .and_then(|observer: Arc<GrowObserver>| async move {
            let resp: Result<Vec<ZoneSummary>, ObserverError> =
                Ok(observer.zone_summaries().await);
            build_response(resp)
        })
        .boxed()
}

/// GET /api/zone/:zone
///
/// One zone's summary; unconfigured zones read as empty and healthy
fn zone(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "zone" / String))
        .and_then(|observer: Arc<GrowObserver>, zone: String| async move {
            let resp: Result<ZoneSummary, ObserverError> = Ok(observer.zone_summary(&zone).await);
            build_response(resp)
        })
        .boxed()
}
