use serde::{Deserialize, Serialize};

use crate::{MetricLevel, Threshold};

/// Per-plant health flag shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlantStatus {
    Healthy,
    NeedsWater,
    TooHot,
    TooCold,
    LowLight,
}

impl PlantStatus {
    pub fn is_unhealthy(&self) -> bool {
        !matches!(self, PlantStatus::Healthy)
    }
}

/// The single status derivation shared by every consumer.
///
/// Precedence when several conditions hold at once: needs-water, too-hot,
/// too-cold, low-light. Undefined readings or ranges skip their condition,
/// so a plant with no data at all reads as healthy.
pub fn derive_status(
    moisture: Option<f64>,
    moisture_range: &Threshold,
    temperature: Option<f64>,
    temperature_range: &Threshold,
    light: Option<f64>,
    light_range: &Threshold,
) -> PlantStatus {
    let moisture_level = moisture.and_then(|v| moisture_range.classify(v));
    let temperature_level = temperature.and_then(|v| temperature_range.classify(v));
    let light_level = light.and_then(|v| light_range.classify(v));

    if moisture_level == Some(MetricLevel::Low) {
        PlantStatus::NeedsWater
    } else if temperature_level == Some(MetricLevel::High) {
        PlantStatus::TooHot
    } else if temperature_level == Some(MetricLevel::Low) {
        PlantStatus::TooCold
    } else if light_level == Some(MetricLevel::Low) {
        PlantStatus::LowLight
    } else {
        PlantStatus::Healthy
    }
}
