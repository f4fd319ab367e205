use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{DeviceId, Sensor, SensorId, SensorTypeId};
use crate::repository::SensorRepository;

fn parse_row(row: &SqliteRow) -> anyhow::Result<Sensor> {
    let id: String = row.try_get("id")?;
    let device_id: String = row.try_get("device_id")?;
    let sensor_type_id: String = row.try_get("sensor_type_id")?;
    Ok(Sensor {
        id: SensorId::parse(&id)?,
        name: row.try_get("name")?,
        device_id: DeviceId::parse(&device_id)?,
        sensor_type_id: SensorTypeId::parse(&sensor_type_id)?,
    })
}

#[async_trait]
impl SensorRepository for SqliteRepo {
    #[instrument(skip(self, sensor), fields(repo = "sensor", operation = "save"))]
    async fn save(&self, sensor: &Sensor) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO sensors (id, name, device_id, sensor_type_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(sensor.id.to_string())
        .bind(&sensor.name)
        .bind(sensor.device_id.to_string())
        .bind(sensor.sensor_type_id.as_str())
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "sensor", operation = "find_by_id"))]
    async fn find_by_id(&self, id: SensorId) -> anyhow::Result<Option<Sensor>> {
        let row = sqlx::query("SELECT * FROM sensors WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_row).transpose()
    }

    #[instrument(skip(self), fields(repo = "sensor", operation = "find_by_device"))]
    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Sensor>> {
        let rows = sqlx::query("SELECT * FROM sensors WHERE device_id = $1 ORDER BY rowid")
            .bind(device_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self, sensor_type_id), fields(repo = "sensor", operation = "find_by_type", sensor_type = %sensor_type_id))]
    async fn find_by_type(&self, sensor_type_id: &SensorTypeId) -> anyhow::Result<Vec<Sensor>> {
        let rows = sqlx::query("SELECT * FROM sensors WHERE sensor_type_id = $1 ORDER BY rowid")
            .bind(sensor_type_id.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self), fields(repo = "sensor", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<Sensor>> {
        let rows = sqlx::query("SELECT * FROM sensors ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }
}
