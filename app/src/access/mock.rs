use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use sprout_core::{
    ActionLogEntry, ActionScope, Plant, SystemThresholds, ZoneSensorSample,
};

use crate::error::DBError;

use super::{ActionLog, PlantRegistry, SensorLog, ThresholdStore};

fn injected_failure() -> DBError {
    DBError::SQLError(sqlx::Error::PoolTimedOut)
}

/// In-memory stand-in for all four stores, with per-call failure injection.
#[derive(Default)]
pub struct MemoryStores {
    pub plants_by_zone: HashMap<String, Vec<Plant>>,
    pub thresholds: SystemThresholds,
    pub samples: HashMap<String, ZoneSensorSample>,
    pub actions: RwLock<Vec<ActionLogEntry>>,
    pub fail_zones: HashSet<String>,
    pub fail_plants: HashSet<String>,
    pub fail_thresholds: bool,
    pub fail_append: bool,
    /// Simulates a stalled time-series store.
    pub sample_delay: Option<Duration>,
}

#[async_trait]
impl PlantRegistry for MemoryStores {
    async fn plants_in_zone(&self, zone: &str) -> Result<Vec<Plant>, DBError> {
        if self.fail_zones.contains(zone) {
            return Err(injected_failure());
        }
        Ok(self.plants_by_zone.get(zone).cloned().unwrap_or_default())
    }

    async fn plant(&self, plant_id: &str) -> Result<Plant, DBError> {
        if self.fail_plants.contains(plant_id) {
            return Err(injected_failure());
        }
        self.plants_by_zone
            .values()
            .flatten()
            .find(|plant| plant.plant_id == plant_id)
            .cloned()
            .ok_or_else(|| DBError::PlantNotFound(plant_id.to_owned()))
    }
}

#[async_trait]
impl ThresholdStore for MemoryStores {
    async fn system_thresholds(&self) -> Result<SystemThresholds, DBError> {
        if self.fail_thresholds {
            return Err(injected_failure());
        }
        Ok(self.thresholds)
    }
}

#[async_trait]
impl SensorLog for MemoryStores {
    async fn latest_sample(&self, cluster: &str) -> Result<Option<ZoneSensorSample>, DBError> {
        if let Some(delay) = self.sample_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.samples.get(cluster).cloned())
    }
}

#[async_trait]
impl ActionLog for MemoryStores {
    async fn recent_actions(
        &self,
        scope: &ActionScope,
        limit: i64,
    ) -> Result<Vec<ActionLogEntry>, DBError> {
        let mut entries: Vec<ActionLogEntry> = self
            .actions
            .read()
            .iter()
            .filter(|entry| match scope {
                ActionScope::Plant(id) => entry.plant_id.as_deref() == Some(id),
                ActionScope::Zone(id) => entry.zone.as_deref() == Some(id),
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit as usize);
        Ok(entries)
    }

    async fn append_action(&self, entry: &ActionLogEntry) -> Result<(), DBError> {
        if self.fail_append {
            return Err(injected_failure());
        }
        self.actions.write().push(entry.clone());
        Ok(())
    }
}
