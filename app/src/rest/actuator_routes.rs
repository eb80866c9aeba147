use std::sync::Arc;

use sprout_core::{ActionScope, ActuatorKind};
use warp::Filter;

use crate::engine::GrowObserver;
use crate::error::{ApiError, ObserverError};

use super::build_response;

pub fn routes(
    observer: &Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    zone_state(observer.clone())
        .or(zone_toggle(observer.clone()))
        .or(plant_state(observer.clone()))
        .or(plant_toggle(observer.clone()))
}

/// GET /api/zone/:zone/actuator/:kind
///
/// The reconstructed on/off state of a zone-scoped actuator
fn zone_state(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "zone" / String / "actuator" / String))
        .and_then(
            |observer: Arc<GrowObserver>, zone: String, kind: String| async move {
                state_response(observer, ActionScope::Zone(zone), kind).await
            },
        )
        .boxed()
}

/// POST /api/zone/:zone/actuator/:kind
///
/// Toggles a zone-scoped actuator; the body names the caller
fn zone_toggle(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::post())
        .and(warp::path!("api" / "zone" / String / "actuator" / String))
        .and(warp::body::json())
        .and_then(
            |observer: Arc<GrowObserver>, zone: String, kind: String, body: dto::ToggleRequestDto| async move {
                toggle_response(observer, ActionScope::Zone(zone), kind, body).await
            },
        )
        .boxed()
}

/// GET /api/plant/:plant/actuator/:kind
fn plant_state(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::get())
        .and(warp::path!("api" / "plant" / String / "actuator" / String))
        .and_then(
            |observer: Arc<GrowObserver>, plant: String, kind: String| async move {
                state_response(observer, ActionScope::Plant(plant), kind).await
            },
        )
        .boxed()
}

/// POST /api/plant/:plant/actuator/:kind
fn plant_toggle(
    observer: Arc<GrowObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::post())
        .and(warp::path!("api" / "plant" / String / "actuator" / String))
        .and(warp::body::json())
        .and_then(
            |observer: Arc<GrowObserver>, plant: String, kind: String, body: dto::ToggleRequestDto| async move {
                toggle_response(observer, ActionScope::Plant(plant), kind, body).await
            },
        )
        .boxed()
}

async fn state_response(
    observer: Arc<GrowObserver>,
    scope: ActionScope,
    kind_raw: String,
) -> Result<Box<dyn warp::Reply>, warp::Rejection> {
    let resp = match kind_raw.parse::<ActuatorKind>() {
        Ok(kind) => Ok(dto::ActuatorStateDto {
            active: observer.actuator_state(&scope, kind).await,
        }),
        Err(_) => Err(ObserverError::from(ApiError::UnknownActuator(kind_raw))),
    };
    build_response(resp)
}

async fn toggle_response(
    observer: Arc<GrowObserver>,
    scope: ActionScope,
    kind_raw: String,
    body: dto::ToggleRequestDto,
) -> Result<Box<dyn warp::Reply>, warp::Rejection> {
    let resp = match kind_raw.parse::<ActuatorKind>() {
        Ok(kind) => {
            let command = observer
                .toggle_actuator(&scope, kind, &body.triggered_by)
                .await;
            Ok(dto::ToggleResponseDto::from(command))
        }
        Err(_) => Err(ObserverError::from(ApiError::UnknownActuator(kind_raw))),
    };
    build_response(resp)
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};
    use sprout_core::{ActuatorKind, CommandState, ToggleCommand};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ActuatorStateDto {
        pub active: bool,
    }

    /// Callers always say who they are; there is no ambient user context
    /// to fall back on.
    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ToggleRequestDto {
        pub triggered_by: String,
    }

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ToggleResponseDto {
        pub kind: ActuatorKind,
        pub action: String,
        pub state: CommandState,
        pub active: bool,
    }

    impl From<ToggleCommand> for ToggleResponseDto {
        fn from(command: ToggleCommand) -> Self {
            ToggleResponseDto {
                kind: command.kind,
                action: command.action().to_owned(),
                state: command.state,
                active: command.effective_state(),
            }
        }
    }
}
