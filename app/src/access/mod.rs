use async_trait::async_trait;
use sprout_core::{
    ActionLogEntry, ActionScope, Plant, SystemThresholds, ZoneSensorSample,
};

use crate::error::DBError;

mod pg;
#[cfg(test)]
pub mod mock;

pub use pg::PgStores;

/// Plant metadata, keyed by zone or by id.
#[async_trait]
pub trait PlantRegistry: Send + Sync {
    async fn plants_in_zone(&self, zone: &str) -> Result<Vec<Plant>, DBError>;
    async fn plant(&self, plant_id: &str) -> Result<Plant, DBError>;
}

/// System-wide environmental ranges.
#[async_trait]
pub trait ThresholdStore: Send + Sync {
    async fn system_thresholds(&self) -> Result<SystemThresholds, DBError>;
}

/// Time-series access, reduced to the single record the engine needs.
#[async_trait]
pub trait SensorLog: Send + Sync {
    async fn latest_sample(&self, cluster: &str) -> Result<Option<ZoneSensorSample>, DBError>;
}

/// The append-only actuator intent log.
#[async_trait]
pub trait ActionLog: Send + Sync {
    /// Recent entries for one scope, newest first (callers re-sort anyway).
    async fn recent_actions(
        &self,
        scope: &ActionScope,
        limit: i64,
    ) -> Result<Vec<ActionLogEntry>, DBError>;
    async fn append_action(&self, entry: &ActionLogEntry) -> Result<(), DBError>;
}
