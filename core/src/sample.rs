use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EnvMetric;

/// Zone-wide readings shared by every plant in the zone.
///
/// All fields are optional: samples arrive from a loosely-typed time-series
/// store and missing fields are a normal condition, not a protocol error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSensors {
    #[serde(rename = "temp")]
    pub temperature: Option<f64>,
    pub light: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "airQuality")]
    pub air_quality: Option<f64>,
}

/// One physical moisture probe reading within a zone sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinReading {
    pub pin: i32,
    #[serde(rename = "soilMoisture")]
    pub soil_moisture: f64,
}

/// The latest known sensor record for a zone: zone-wide environment plus a
/// per-pin soil moisture breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSensorSample {
    pub timestamp: DateTime<Utc>,
    pub zone_sensors: ZoneSensors,
    pub soil_moisture_by_pin: Vec<PinReading>,
}

impl ZoneSensors {
    pub fn value(&self, metric: EnvMetric) -> Option<f64> {
        match metric {
            EnvMetric::Temperature => self.temperature,
            EnvMetric::AirQuality => self.air_quality,
            EnvMetric::Light => self.light,
        }
    }
}

impl ZoneSensorSample {
    /// Resolves one plant's moisture reading by pin.
    ///
    /// Pins should be unique per zone, but that is not enforced anywhere;
    /// on duplicates the first entry wins. No matching entry means the value
    /// is undefined and must not be compared against any threshold.
    pub fn moisture_for_pin(&self, pin: i32) -> Option<f64> {
        self.soil_moisture_by_pin
            .iter()
            .find(|reading| reading.pin == pin)
            .map(|reading| reading.soil_moisture)
    }
}
