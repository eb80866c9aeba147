use serde::{Deserialize, Serialize};

use crate::Threshold;

/// A plant record as the registry reports it.
///
/// `moisture_pin` ties the plant to one entry of its zone's per-pin sample
/// array; a plant without an assigned pin has no resolvable moisture value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub plant_id: String,
    pub name: String,
    pub zone: String,
    pub moisture_pin: Option<i32>,
    pub moisture_threshold: Threshold,
}
