use chrono::{DateTime, NaiveDateTime, Utc};
use sprout_core::{ActionLogEntry, ActionScope};

use crate::error::DBError;

#[derive(Debug, sqlx::FromRow)]
struct ActionLogDao {
    action: String,
    actuator_id: String,
    plant_id: Option<String>,
    zone: Option<String>,
    trigger: String,
    trigger_by: String,
    timestamp: NaiveDateTime,
}

impl From<ActionLogDao> for ActionLogEntry {
    fn from(dao: ActionLogDao) -> Self {
        ActionLogEntry {
            action: dao.action,
            actuator_id: dao.actuator_id,
            plant_id: dao.plant_id,
            zone: dao.zone,
            trigger: dao.trigger,
            trigger_by: dao.trigger_by,
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(dao.timestamp, Utc),
        }
    }
}

/// The most recent entries for one scope, newest first.
pub async fn get_recent(
    conn: &sqlx::PgPool,
    scope: &ActionScope,
    limit: i64,
) -> Result<Vec<ActionLogEntry>, DBError> {
    let query = match scope {
        ActionScope::Plant(_) => {
            "SELECT action, actuator_id, plant_id, zone, trigger, trigger_by, timestamp
             FROM action_log WHERE plant_id = $1
             ORDER BY timestamp DESC LIMIT $2"
        }
        ActionScope::Zone(_) => {
            "SELECT action, actuator_id, plant_id, zone, trigger, trigger_by, timestamp
             FROM action_log WHERE zone = $1
             ORDER BY timestamp DESC LIMIT $2"
        }
    };
    let rows = sqlx::query_as::<_, ActionLogDao>(query)
        .bind(scope.id())
        .bind(limit)
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(ActionLogEntry::from).collect())
}

/// Appends one entry. The log is insert-only, there is no update path.
pub async fn insert(conn: &sqlx::PgPool, entry: &ActionLogEntry) -> Result<(), DBError> {
    sqlx::query(
        "INSERT INTO action_log (action, actuator_id, plant_id, zone, trigger, trigger_by, timestamp)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&entry.action)
    .bind(&entry.actuator_id)
    .bind(&entry.plant_id)
    .bind(&entry.zone)
    .bind(&entry.trigger)
    .bind(&entry.trigger_by)
    .bind(entry.timestamp.naive_utc())
    .execute(conn)
    .await?;
    Ok(())
}
