use chrono::{DateTime, NaiveDateTime, Utc};
use sprout_core::{PinReading, ZoneSensorSample, ZoneSensors};
use sqlx::types::Json;

use crate::error::DBError;

#[derive(Debug, sqlx::FromRow)]
struct ZoneSampleDao {
    timestamp: NaiveDateTime,
    temperature: Option<f64>,
    light: Option<f64>,
    humidity: Option<f64>,
    air_quality: Option<f64>,
    soil_moisture_by_pin: Json<Vec<PinReading>>,
}

impl From<ZoneSampleDao> for ZoneSensorSample {
    fn from(dao: ZoneSampleDao) -> Self {
        ZoneSensorSample {
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(dao.timestamp, Utc),
            zone_sensors: ZoneSensors {
                temperature: dao.temperature,
                light: dao.light,
                humidity: dao.humidity,
                air_quality: dao.air_quality,
            },
            soil_moisture_by_pin: dao.soil_moisture_by_pin.0,
        }
    }
}

/// The newest sample for a sensor cluster, if any was ever recorded.
pub async fn get_latest(
    conn: &sqlx::PgPool,
    cluster: &str,
) -> Result<Option<ZoneSensorSample>, DBError> {
    let row = sqlx::query_as::<_, ZoneSampleDao>(
        "SELECT timestamp, temperature, light, humidity, air_quality, soil_moisture_by_pin
         FROM zone_samples WHERE cluster = $1
         ORDER BY timestamp DESC LIMIT 1",
    )
    .bind(cluster)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(ZoneSensorSample::from))
}
