// Log table. `time` is fixed-width ISO text so range filters compare lexically;
// `numeric_value` mirrors numeric readings for sign filters.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{
    DeviceId, LogId, LogReading, ReadingValue, SensorId, SensorTypeId, TimeStamp, TimeWindow,
};
use crate::repository::LogRepository;

fn parse_row(row: &SqliteRow) -> anyhow::Result<LogReading> {
    let id: String = row.try_get("id")?;
    let time: String = row.try_get("time")?;
    let value: String = row.try_get("value")?;
    let kind: String = row.try_get("value_kind")?;
    let sensor_id: String = row.try_get("sensor_id")?;
    let device_id: String = row.try_get("device_id")?;
    let sensor_type_id: String = row.try_get("sensor_type_id")?;
    Ok(LogReading {
        id: LogId::parse(&id)?,
        time: TimeStamp::parse_iso(&time)?,
        value: ReadingValue::from_parts(&kind, &value)?,
        sensor_id: SensorId::parse(&sensor_id)?,
        device_id: DeviceId::parse(&device_id)?,
        sensor_type_id: SensorTypeId::parse(&sensor_type_id)?,
    })
}

#[async_trait]
impl LogRepository for SqliteRepo {
    #[instrument(skip(self, log), fields(repo = "log", operation = "save"))]
    async fn save(&self, log: &LogReading) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO logs (id, time, value, value_kind, numeric_value, sensor_id, device_id, sensor_type_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(log.id.to_string())
        .bind(log.time.to_string())
        .bind(log.value.to_string())
        .bind(log.value.kind())
        .bind(log.value.as_f64())
        .bind(log.sensor_id.to_string())
        .bind(log.device_id.to_string())
        .bind(log.sensor_type_id.as_str())
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "log", operation = "find_by_device"))]
    async fn find_by_device(
        &self,
        device_id: DeviceId,
        window: Option<TimeWindow>,
    ) -> anyhow::Result<Vec<LogReading>> {
        let rows = match window {
            Some(w) => {
                sqlx::query(
                    "SELECT * FROM logs WHERE device_id = $1 AND time >= $2 AND time <= $3
                     ORDER BY time ASC, rowid ASC",
                )
                .bind(device_id.to_string())
                .bind(w.start().to_string())
                .bind(w.end().to_string())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT * FROM logs WHERE device_id = $1 ORDER BY time ASC, rowid ASC")
                    .bind(device_id.to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self), fields(repo = "log", operation = "find_device_readings"))]
    async fn find_device_readings(
        &self,
        device_id: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>> {
        let rows = sqlx::query(
            "SELECT * FROM logs WHERE device_id = $1 AND sensor_type_id = $2 AND time >= $3 AND time <= $4
             ORDER BY time ASC, rowid ASC",
        )
        .bind(device_id.to_string())
        .bind(sensor_type_id.as_str())
        .bind(window.start().to_string())
        .bind(window.end().to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self), fields(repo = "log", operation = "find_negative_readings"))]
    async fn find_negative_readings(
        &self,
        excluded: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>> {
        let rows = sqlx::query(
            "SELECT * FROM logs WHERE device_id <> $1 AND sensor_type_id = $2 AND numeric_value < 0
             AND time >= $3 AND time <= $4 ORDER BY time ASC, rowid ASC",
        )
        .bind(excluded.to_string())
        .bind(sensor_type_id.as_str())
        .bind(window.start().to_string())
        .bind(window.end().to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(parse_row).collect()
    }
}
