use sprout_core::{Plant, Threshold};

use crate::error::DBError;

#[derive(Debug, sqlx::FromRow)]
pub struct PlantDao {
    plant_id: String,
    name: String,
    zone: String,
    moisture_pin: Option<i32>,
    moisture_min: Option<f64>,
    moisture_max: Option<f64>,
}

impl From<PlantDao> for Plant {
    fn from(dao: PlantDao) -> Self {
        Plant {
            plant_id: dao.plant_id,
            name: dao.name,
            zone: dao.zone,
            moisture_pin: dao.moisture_pin,
            moisture_threshold: Threshold {
                min: dao.moisture_min,
                max: dao.moisture_max,
            },
        }
    }
}

pub async fn get_by_zone(conn: &sqlx::PgPool, zone: &str) -> Result<Vec<Plant>, DBError> {
    let rows = sqlx::query_as::<_, PlantDao>(
        "SELECT plant_id, name, zone, moisture_pin, moisture_min, moisture_max
         FROM plants WHERE zone = $1 ORDER BY plant_id",
    )
    .bind(zone)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(Plant::from).collect())
}

pub async fn get(conn: &sqlx::PgPool, plant_id: &str) -> Result<Plant, DBError> {
    let row = sqlx::query_as::<_, PlantDao>(
        "SELECT plant_id, name, zone, moisture_pin, moisture_min, moisture_max
         FROM plants WHERE plant_id = $1",
    )
    .bind(plant_id)
    .fetch_optional(conn)
    .await?;
    row.map(Plant::from)
        .ok_or_else(|| DBError::PlantNotFound(plant_id.to_owned()))
}
