use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{Device, DeviceId, RoomId};
use crate::repository::DeviceRepository;

fn parse_row(row: &SqliteRow) -> anyhow::Result<Device> {
    let id: String = row.try_get("id")?;
    let room_id: String = row.try_get("room_id")?;
    Ok(Device {
        id: DeviceId::parse(&id)?,
        name: row.try_get("name")?,
        model: row.try_get("model")?,
        active: row.try_get("active")?,
        room_id: RoomId::parse(&room_id)?,
    })
}

#[async_trait]
impl DeviceRepository for SqliteRepo {
    #[instrument(skip(self, device), fields(repo = "device", operation = "save"))]
    async fn save(&self, device: &Device) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO devices (id, name, model, active, room_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(device.id.to_string())
        .bind(&device.name)
        .bind(&device.model)
        .bind(device.active)
        .bind(device.room_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self, device), fields(repo = "device", operation = "update"))]
    async fn update(&self, device: &Device) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE devices SET name = $2, model = $3, active = $4, room_id = $5 WHERE id = $1",
        )
        .bind(device.id.to_string())
        .bind(&device.name)
        .bind(&device.model)
        .bind(device.active)
        .bind(device.room_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "device", operation = "find_by_id"))]
    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>> {
        let row = sqlx::query("SELECT * FROM devices WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_row).transpose()
    }

    #[instrument(skip(self), fields(repo = "device", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<Device>> {
        let rows = sqlx::query("SELECT * FROM devices ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self), fields(repo = "device", operation = "find_by_room"))]
    async fn find_by_room(&self, room_id: RoomId) -> anyhow::Result<Vec<Device>> {
        let rows = sqlx::query("SELECT * FROM devices WHERE room_id = $1 ORDER BY rowid")
            .bind(room_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }
}
