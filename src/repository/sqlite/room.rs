use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{HouseId, Room, RoomDimensions, RoomId};
use crate::repository::RoomRepository;

fn parse_row(row: &SqliteRow) -> anyhow::Result<Room> {
    let id: String = row.try_get("id")?;
    let house_id: String = row.try_get("house_id")?;
    Ok(Room {
        id: RoomId::parse(&id)?,
        name: row.try_get("name")?,
        floor: row.try_get("floor")?,
        dimensions: RoomDimensions::new(
            row.try_get("length")?,
            row.try_get("width")?,
            row.try_get("height")?,
        )?,
        house_id: HouseId::parse(&house_id)?,
    })
}

#[async_trait]
impl RoomRepository for SqliteRepo {
    #[instrument(skip(self, room), fields(repo = "room", operation = "save"))]
    async fn save(&self, room: &Room) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO rooms (id, name, floor, length, width, height, house_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(room.id.to_string())
        .bind(&room.name)
        .bind(room.floor)
        .bind(room.dimensions.length)
        .bind(room.dimensions.width)
        .bind(room.dimensions.height)
        .bind(room.house_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "room", operation = "find_by_id"))]
    async fn find_by_id(&self, id: RoomId) -> anyhow::Result<Option<Room>> {
        let row = sqlx::query("SELECT * FROM rooms WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_row).transpose()
    }

    #[instrument(skip(self), fields(repo = "room", operation = "find_all"))]
    async fn find_all(&self) -> anyhow::Result<Vec<Room>> {
        let rows = sqlx::query("SELECT * FROM rooms ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_row).collect()
    }
}
