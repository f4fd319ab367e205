// Sensor and actuator type catalogue tables

use async_trait::async_trait;
use sqlx::Row;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{ActuatorTypeId, SensorType, SensorTypeId};
use crate::repository::{ActuatorTypeRepository, SensorTypeRepository};

#[async_trait]
impl SensorTypeRepository for SqliteRepo {
    #[instrument(skip(self, sensor_type), fields(repo = "sensor_type", operation = "save"))]
    async fn save(&self, sensor_type: &SensorType) -> anyhow::Result<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO sensor_types (id, unit) VALUES ($1, $2)")
            .bind(sensor_type.id.as_str())
            .bind(&sensor_type.unit)
            .execute(&self.pool)
            .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "sensor_type", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<SensorType>> {
        let rows = sqlx::query("SELECT id, unit FROM sensor_types ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let unit: String = row.try_get("unit")?;
            out.push(SensorType::new(SensorTypeId::parse(&id)?, &unit)?);
        }
        Ok(out)
    }

    async fn is_present(&self, id: &SensorTypeId) -> anyhow::Result<bool> {
        let row = sqlx::query("SELECT 1 FROM sensor_types WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl ActuatorTypeRepository for SqliteRepo {
    #[instrument(skip(self, id), fields(repo = "actuator_type", operation = "save"))]
    async fn save(&self, id: &ActuatorTypeId) -> anyhow::Result<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO actuator_types (id) VALUES ($1)")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "actuator_type", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<ActuatorTypeId>> {
        let rows = sqlx::query("SELECT id FROM actuator_types ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            out.push(ActuatorTypeId::parse(&id)?);
        }
        Ok(out)
    }

    async fn is_present(&self, id: &ActuatorTypeId) -> anyhow::Result<bool> {
        let row = sqlx::query("SELECT 1 FROM actuator_types WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
