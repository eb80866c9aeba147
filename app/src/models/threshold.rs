use sprout_core::{SystemThresholds, Threshold};

use crate::error::DBError;

#[derive(Debug, sqlx::FromRow)]
struct ThresholdDao {
    metric: String,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

/// Loads the system-wide environmental ranges.
///
/// Unknown metric rows are ignored, missing rows leave the default
/// (unevaluable) range in place.
pub async fn get_system(conn: &sqlx::PgPool) -> Result<SystemThresholds, DBError> {
    let rows = sqlx::query_as::<_, ThresholdDao>(
        "SELECT metric, min_value, max_value FROM system_thresholds",
    )
    .fetch_all(conn)
    .await?;

    let mut thresholds = SystemThresholds::default();
    for row in rows {
        let range = Threshold {
            min: row.min_value,
            max: row.max_value,
        };
        match row.metric.as_str() {
            "temperature" => thresholds.temperature = range,
            "light" => thresholds.light = range,
            "airQuality" => thresholds.air_quality = range,
            _ => (),
        }
    }
    Ok(thresholds)
}
