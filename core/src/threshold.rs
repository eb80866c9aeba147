use serde::{Deserialize, Serialize};

/// A `{min, max}` acceptable range for one metric.
///
/// Both bounds are optional: threshold records come from loosely-typed
/// external stores and either side may simply not be configured yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricLevel {
    Low,
    Normal,
    High,
}

impl Threshold {
    pub fn new(min: f64, max: f64) -> Self {
        Threshold {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A range with one undefined bound is never evaluated - there is no
    /// default range to assume.
    pub fn is_evaluable(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Tri-state classification of `value` against this range.
    ///
    /// Returns `None` (skip) unless both bounds are defined. The bounds
    /// themselves count as in-range: `value == min` and `value == max`
    /// classify as `Normal`.
    pub fn classify(&self, value: f64) -> Option<MetricLevel> {
        let (min, max) = (self.min?, self.max?);
        if value < min {
            Some(MetricLevel::Low)
        } else if value > max {
            Some(MetricLevel::High)
        } else {
            Some(MetricLevel::Normal)
        }
    }
}

/// System-wide environmental ranges, shared by every zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemThresholds {
    pub temperature: Threshold,
    pub light: Threshold,
    pub air_quality: Threshold,
}

/// Zone-level environmental metrics, in their fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMetric {
    Temperature,
    AirQuality,
    Light,
}

impl EnvMetric {
    /// Alert construction order is zone-major, then this metric order.
    pub const EVAL_ORDER: [EnvMetric; 3] =
        [EnvMetric::Temperature, EnvMetric::AirQuality, EnvMetric::Light];

    /// The alert `type` tag.
    pub fn key(&self) -> &'static str {
        match self {
            EnvMetric::Temperature => "temperature",
            EnvMetric::AirQuality => "airQuality",
            EnvMetric::Light => "light",
        }
    }

    /// Capitalized form used in alert messages.
    pub fn label(&self) -> &'static str {
        match self {
            EnvMetric::Temperature => "Temperature",
            EnvMetric::AirQuality => "AirQuality",
            EnvMetric::Light => "Light",
        }
    }
}

impl SystemThresholds {
    pub fn get(&self, metric: EnvMetric) -> &Threshold {
        match metric {
            EnvMetric::Temperature => &self.temperature,
            EnvMetric::AirQuality => &self.air_quality,
            EnvMetric::Light => &self.light,
        }
    }
}
