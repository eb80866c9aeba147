use serde::Serialize;
use sprout_core::{derive_status, Plant, SystemThresholds, ZoneSensorSample};
use utoipa::ToSchema;

use super::GrowObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Healthy,
    Warning,
}

/// One zone's dashboard card: averaged soil moisture, the latest zone-wide
/// environment readings and a rolled-up health flag.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub zone: String,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub light: f64,
    pub humidity: f64,
    pub air_quality: f64,
    pub status: ZoneStatus,
    pub plant_count: usize,
}

impl GrowObserver {
    pub async fn zone_summary(&self, zone: &str) -> ZoneSummary {
        let system = self
            .fetch("system thresholds", self.thresholds.system_thresholds())
            .await
            .unwrap_or_default();
        let plants = self
            .fetch("zone plants", self.registry.plants_in_zone(zone))
            .await
            .unwrap_or_default();
        let cluster = self.settings.sensor_cluster(zone);
        let sample = self
            .fetch("latest sample", self.sensor_log.latest_sample(cluster))
            .await
            .flatten();

        summarize(zone, &plants, sample.as_ref(), &system)
    }

    pub async fn zone_summaries(&self) -> Vec<ZoneSummary> {
        let mut summaries = Vec::with_capacity(self.settings.zones.len());
        for zone in &self.settings.zones {
            summaries.push(self.zone_summary(zone).await);
        }
        summaries
    }
}

/// Pure aggregation over already-fetched data.
fn summarize(
    zone: &str,
    plants: &[Plant],
    sample: Option<&ZoneSensorSample>,
    system: &SystemThresholds,
) -> ZoneSummary {
    let sensors = sample.map(|s| s.zone_sensors).unwrap_or_default();

    let mut resolved = Vec::new();
    let mut warning = false;
    for plant in plants {
        let moisture = sample.and_then(|s| {
            plant.moisture_pin.and_then(|pin| s.moisture_for_pin(pin))
        });
        if let Some(value) = moisture {
            resolved.push(value);
        }
        let status = derive_status(
            moisture,
            &plant.moisture_threshold,
            sensors.temperature,
            &system.temperature,
            sensors.light,
            &system.light,
        );
        warning |= status.is_unhealthy();
    }

    let soil_moisture = if resolved.is_empty() {
        0.0
    } else {
        resolved.iter().sum::<f64>() / resolved.len() as f64
    };

    ZoneSummary {
        zone: zone.to_owned(),
        soil_moisture: soil_moisture.round(),
        temperature: round_one_decimal(sensors.temperature.unwrap_or_default()),
        light: sensors.light.unwrap_or_default().round(),
        humidity: sensors.humidity.unwrap_or_default().round(),
        air_quality: sensors.air_quality.unwrap_or_default().round(),
        status: if warning {
            ZoneStatus::Warning
        } else {
            ZoneStatus::Healthy
        },
        plant_count: plants.len(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
