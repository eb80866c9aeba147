use async_trait::async_trait;
use sprout_core::{
    ActionLogEntry, ActionScope, Plant, SystemThresholds, ZoneSensorSample,
};

use crate::error::DBError;
use crate::models;

use super::{ActionLog, PlantRegistry, SensorLog, ThresholdStore};

/// All four accessors backed by the same connection pool.
pub struct PgStores {
    conn: sqlx::PgPool,
}

impl PgStores {
    pub fn new(conn: sqlx::PgPool) -> Self {
        PgStores { conn }
    }
}

#[async_trait]
impl PlantRegistry for PgStores {
    async fn plants_in_zone(&self, zone: &str) -> Result<Vec<Plant>, DBError> {
        models::plant::get_by_zone(&self.conn, zone).await
    }

    async fn plant(&self, plant_id: &str) -> Result<Plant, DBError> {
        models::plant::get(&self.conn, plant_id).await
    }
}

#[async_trait]
impl ThresholdStore for PgStores {
    async fn system_thresholds(&self) -> Result<SystemThresholds, DBError> {
        models::threshold::get_system(&self.conn).await
    }
}

#[async_trait]
impl SensorLog for PgStores {
    async fn latest_sample(&self, cluster: &str) -> Result<Option<ZoneSensorSample>, DBError> {
        models::sensor_log::get_latest(&self.conn, cluster).await
    }
}

#[async_trait]
impl ActionLog for PgStores {
    async fn recent_actions(
        &self,
        scope: &ActionScope,
        limit: i64,
    ) -> Result<Vec<ActionLogEntry>, DBError> {
        models::action_log::get_recent(&self.conn, scope, limit).await
    }

    async fn append_action(&self, entry: &ActionLogEntry) -> Result<(), DBError> {
        models::action_log::insert(&self.conn, entry).await
    }
}
