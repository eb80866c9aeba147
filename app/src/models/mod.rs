use crate::config::CONFIG;
use crate::error::DBError;

pub async fn establish_db_connection() -> Option<sqlx::PgPool> {
    let database_url = CONFIG.database_url();
    sqlx::postgres::PgPoolOptions::new()
        .connect(&database_url)
        .await
        .ok()
}

pub async fn check_schema(conn: &sqlx::PgPool) -> Result<(), DBError> {
    sqlx::query("SELECT count(*) FROM plants")
        .fetch_one(conn)
        .await?;
    Ok(())
}

pub mod action_log;
pub mod plant;
pub mod sensor_log;
pub mod threshold;
