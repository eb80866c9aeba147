use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::access::{ActionLog, PgStores, PlantRegistry, SensorLog, ThresholdStore};
use crate::config::CONFIG;
use crate::error::DBError;

mod actuator;
mod alerts;
mod zone;
#[cfg(test)]
mod test;

pub use zone::{ZoneStatus, ZoneSummary};

/// Everything the engine needs to know about its deployment, resolved once
/// at startup. The engine itself never reads the environment.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub zones: Vec<String>,
    pub fetch_timeout: Duration,
    pub plant_fanout: usize,
    pub action_scan_depth: i64,
    /// Zones whose sensors live on another zone's hardware.
    pub sensor_clusters: HashMap<String, String>,
}

impl EngineSettings {
    pub fn from_config() -> Self {
        EngineSettings {
            zones: CONFIG.zones(),
            fetch_timeout: Duration::from_millis(CONFIG.fetch_timeout_ms()),
            plant_fanout: CONFIG.plant_fanout(),
            action_scan_depth: CONFIG.action_scan_depth(),
            sensor_clusters: CONFIG.sensor_clusters(),
        }
    }

    /// The sensor cluster serving `zone`. Defaults to the zone itself.
    pub fn sensor_cluster<'a>(&'a self, zone: &'a str) -> &'a str {
        self.sensor_clusters
            .get(zone)
            .map(String::as_str)
            .unwrap_or(zone)
    }
}

/// The read-side facade: evaluates alerts, aggregates zones and reconstructs
/// actuator states on demand, over whatever store implementations it was
/// built with.
pub struct GrowObserver {
    pub(crate) registry: Arc<dyn PlantRegistry>,
    pub(crate) thresholds: Arc<dyn ThresholdStore>,
    pub(crate) sensor_log: Arc<dyn SensorLog>,
    pub(crate) action_log: Arc<dyn ActionLog>,
    pub(crate) settings: EngineSettings,
}

impl GrowObserver {
    pub fn new(
        registry: Arc<dyn PlantRegistry>,
        thresholds: Arc<dyn ThresholdStore>,
        sensor_log: Arc<dyn SensorLog>,
        action_log: Arc<dyn ActionLog>,
        settings: EngineSettings,
    ) -> Arc<Self> {
        Arc::new(GrowObserver {
            registry,
            thresholds,
            sensor_log,
            action_log,
            settings,
        })
    }

    pub fn for_pg(conn: sqlx::PgPool, settings: EngineSettings) -> Arc<Self> {
        let stores = Arc::new(PgStores::new(conn));
        GrowObserver::new(
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores,
            settings,
        )
    }

    /// Runs one store call under the configured deadline.
    pub(crate) async fn fetch<T>(
        &self,
        what: &str,
        fut: impl Future<Output = Result<T, DBError>>,
    ) -> Option<T> {
        fetch_bounded(self.settings.fetch_timeout, what, fut).await
    }

    /// Store reachability as seen from the engine, for the health endpoint.
    pub async fn store_state(&self) -> &'static str {
        match self.fetch("system thresholds", self.thresholds.system_thresholds()).await {
            Some(_) => "connected",
            None => "error",
        }
    }
}

/// Runs one store future under a deadline.
///
/// Failures and timeouts degrade to `None`; the caller treats the unit as
/// having no data instead of failing the whole evaluation.
pub(crate) async fn fetch_bounded<T>(
    deadline: Duration,
    what: &str,
    fut: impl Future<Output = Result<T, DBError>>,
) -> Option<T> {
    match tokio::time::timeout(deadline, fut).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!("Fetching {} failed: {}", what, e);
            None
        }
        Err(_) => {
            warn!("Fetching {} timed out", what);
            None
        }
    }
}
