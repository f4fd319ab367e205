use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{Actuator, ActuatorId, ActuatorTypeId, DeviceId, Settings};
use crate::repository::ActuatorRepository;

/// Limits are stored in their text form and re-validated on load.
fn parse_settings(row: &SqliteRow) -> anyhow::Result<Settings> {
    let lower: Option<String> = row.try_get("lower_limit")?;
    let upper: Option<String> = row.try_get("upper_limit")?;
    let precision: Option<String> = row.try_get("precision")?;
    Ok(match (lower, upper, precision) {
        (Some(lower), Some(upper), Some(precision)) => Settings::decimal(&lower, &upper, &precision)?,
        (Some(lower), Some(upper), None) => Settings::integer(&lower, &upper)?,
        _ => Settings::None,
    })
}

fn parse_row(row: &SqliteRow) -> anyhow::Result<Actuator> {
    let id: String = row.try_get("id")?;
    let type_id: String = row.try_get("actuator_type_id")?;
    let device_id: String = row.try_get("device_id")?;
    Ok(Actuator {
        id: ActuatorId::parse(&id)?,
        name: row.try_get("name")?,
        actuator_type_id: ActuatorTypeId::parse(&type_id)?,
        device_id: DeviceId::parse(&device_id)?,
        settings: parse_settings(row)?,
        status: row.try_get("status")?,
    })
}

#[async_trait]
impl ActuatorRepository for SqliteRepo {
    #[instrument(skip(self, actuator), fields(repo = "actuator", operation = "save"))]
    async fn save(&self, actuator: &Actuator) -> anyhow::Result<bool> {
        let (lower, upper, precision) = match actuator.settings.limits() {
            Some((lower, upper, precision)) => (Some(lower), Some(upper), precision),
            None => (None, None, None),
        };
        let result = sqlx::query(
            "INSERT OR IGNORE INTO actuators (id, name, actuator_type_id, device_id, lower_limit, upper_limit, precision, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(actuator.id.to_string())
        .bind(&actuator.name)
        .bind(actuator.actuator_type_id.as_str())
        .bind(actuator.device_id.to_string())
        .bind(lower)
        .bind(upper)
        .bind(precision)
        .bind(&actuator.status)
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    /// Only the status changes after creation.
    #[instrument(skip(self, actuator), fields(repo = "actuator", operation = "update"))]
    async fn update(&self, actuator: &Actuator) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE actuators SET status = $2 WHERE id = $1")
            .bind(actuator.id.to_string())
            .bind(&actuator.status)
            .execute(&self.pool)
            .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "actuator", operation = "find_by_id"))]
    async fn find_by_id(&self, id: ActuatorId) -> anyhow::Result<Option<Actuator>> {
        let row = sqlx::query("SELECT * FROM actuators WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_row).transpose()
    }

    #[instrument(skip(self), fields(repo = "actuator", operation = "find_by_device"))]
    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Actuator>> {
        let rows = sqlx::query("SELECT * FROM actuators WHERE device_id = $1 ORDER BY rowid")
            .bind(device_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self), fields(repo = "actuator", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<Actuator>> {
        let rows = sqlx::query("SELECT * FROM actuators ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }
}
