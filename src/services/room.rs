use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{Room, RoomDimensions, RoomId};
use crate::repository::{HouseRepository, Repositories, RoomRepository};

#[derive(Clone)]
pub struct RoomService {
    houses: Arc<dyn HouseRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl RoomService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            houses: repos.houses.clone(),
            rooms: repos.rooms.clone(),
        }
    }

    /// Rooms always belong to the configured house.
    pub async fn add(
        &self,
        name: &str,
        floor: i32,
        dimensions: RoomDimensions,
    ) -> ServiceResult<Room> {
        let house = self
            .houses
            .find()
            .await?
            .ok_or_else(|| ServiceError::rule("House is not configured"))?;
        let room = Room::new(name, floor, dimensions, house.id)?;
        if !self.rooms.save(&room).await? {
            return Err(ServiceError::NotSaved("Room"));
        }
        tracing::info!(room_id = %room.id, name = %room.name, "Room added");
        Ok(room)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Room>> {
        Ok(self.rooms.find_all().await?)
    }

    pub async fn get(&self, id: RoomId) -> ServiceResult<Room> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Room"))
    }
}
