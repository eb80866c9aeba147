use std::sync::Arc;

use sprout_core::{
    evaluate_env_metric, evaluate_moisture, Alert, EnvMetric, Plant, SystemThresholds,
    ZoneSensorSample,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::{fetch_bounded, GrowObserver};

impl GrowObserver {
    /// All current alerts, zone-major in configured zone order, then
    /// environment metrics in their fixed order, then plants in registry
    /// order. The list is rebuilt from scratch on every call.
    pub async fn alerts(&self) -> Vec<Alert> {
        let thresholds = self
            .fetch("system thresholds", self.thresholds.system_thresholds())
            .await
            .unwrap_or_default();

        let mut alerts = Vec::new();
        for zone in &self.settings.zones {
            alerts.extend(self.zone_alerts(zone, &thresholds).await);
        }
        alerts
    }

    pub async fn alert_count(&self) -> usize {
        self.alerts().await.len()
    }

    /// One zone's alerts. A zone whose data cannot be fetched contributes
    /// nothing; the other zones are unaffected.
    async fn zone_alerts(&self, zone: &str, system: &SystemThresholds) -> Vec<Alert> {
        let cluster = self.settings.sensor_cluster(zone);
        let sample = self
            .fetch("latest sample", self.sensor_log.latest_sample(cluster))
            .await
            .flatten();
        let Some(sample) = sample else {
            debug!("No sensor sample for zone {}", zone);
            return Vec::new();
        };

        let mut alerts = Vec::new();
        for metric in EnvMetric::EVAL_ORDER {
            let value = sample.zone_sensors.value(metric);
            if let Some(alert) = evaluate_env_metric(zone, metric, value, system.get(metric)) {
                alerts.push(alert);
            }
        }

        let plants = self
            .fetch("zone plants", self.registry.plants_in_zone(zone))
            .await
            .unwrap_or_default();
        alerts.extend(self.plant_alerts(zone, plants, &sample).await);
        alerts
    }

    /// Per-plant moisture alerts. Threshold lookups run concurrently under
    /// the fan-out limit; results are reassembled in registry order so the
    /// output stays deterministic.
    async fn plant_alerts(
        &self,
        zone: &str,
        plants: Vec<Plant>,
        sample: &ZoneSensorSample,
    ) -> Vec<Alert> {
        let semaphore = Arc::new(Semaphore::new(self.settings.plant_fanout.max(1)));
        let deadline = self.settings.fetch_timeout;
        let mut tasks = JoinSet::new();

        for (index, plant) in plants.into_iter().enumerate() {
            let moisture = plant.moisture_pin.and_then(|pin| sample.moisture_for_pin(pin));
            // No pin or no reading: the value is undefined, nothing to judge.
            let Some(value) = moisture else { continue };

            let registry = self.registry.clone();
            let zone = zone.to_owned();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                // The per-plant record is the authoritative threshold source.
                // A failed lookup suppresses this plant's alert only.
                let alert = fetch_bounded(deadline, "plant threshold", registry.plant(&plant.plant_id))
                    .await
                    .and_then(|fresh| {
                        evaluate_moisture(&zone, &plant.name, Some(value), &fresh.moisture_threshold)
                    });
                (index, alert)
            });
        }

        let mut keyed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(alert))) => keyed.push((index, alert)),
                Ok((_, None)) => (),
                Err(e) => warn!("Plant evaluation task failed: {}", e),
            }
        }
        keyed.sort_by_key(|(index, _)| *index);
        keyed.into_iter().map(|(_, alert)| alert).collect()
    }
}
