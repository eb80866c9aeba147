use serde::{Deserialize, Serialize};

use crate::{EnvMetric, MetricLevel, Threshold};

/// Below minimum is `Critical`, above maximum is `Warning` - the asymmetry
/// is a policy choice carried over from the dashboard this engine replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

/// One out-of-range observation. Derived on every evaluation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Alert {
    #[serde(rename = "type")]
    pub metric: String,
    pub zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<String>,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
}

/// Evaluates one zone-wide metric against the system threshold.
///
/// Skips (returns `None`) when the reading or either bound is undefined,
/// or when the value is in range.
pub fn evaluate_env_metric(
    zone: &str,
    metric: EnvMetric,
    value: Option<f64>,
    range: &Threshold,
) -> Option<Alert> {
    let value = value?;
    match range.classify(value)? {
        MetricLevel::Low => Some(Alert {
            metric: metric.key().to_owned(),
            zone: zone.to_owned(),
            plant: None,
            message: format!("{} is below minimum threshold", metric.label()),
            value,
            threshold: range.min.unwrap_or_default(),
            severity: Severity::Critical,
        }),
        MetricLevel::High => Some(Alert {
            metric: metric.key().to_owned(),
            zone: zone.to_owned(),
            plant: None,
            message: format!("{} exceeds maximum threshold", metric.label()),
            value,
            threshold: range.max.unwrap_or_default(),
            severity: Severity::Warning,
        }),
        MetricLevel::Normal => None,
    }
}

/// Evaluates one plant's resolved soil moisture against its own threshold.
pub fn evaluate_moisture(
    zone: &str,
    plant_name: &str,
    value: Option<f64>,
    range: &Threshold,
) -> Option<Alert> {
    let value = value?;
    match range.classify(value)? {
        MetricLevel::Low => Some(Alert {
            metric: "moisture".to_owned(),
            zone: zone.to_owned(),
            plant: Some(plant_name.to_owned()),
            message: "Low moisture level detected".to_owned(),
            value,
            threshold: range.min.unwrap_or_default(),
            severity: Severity::Critical,
        }),
        MetricLevel::High => Some(Alert {
            metric: "moisture".to_owned(),
            zone: zone.to_owned(),
            plant: Some(plant_name.to_owned()),
            message: "High moisture level detected".to_owned(),
            value,
            threshold: range.max.unwrap_or_default(),
            severity: Severity::Warning,
        }),
        MetricLevel::Normal => None,
    }
}
