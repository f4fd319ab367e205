// Rooms and their dimensions. Height 0 marks an outdoor area.

use super::{HouseId, RoomId, non_blank};
use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl RoomDimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, ValidationError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(ValidationError::rule("Room length must be greater than zero"));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(ValidationError::rule("Room width must be greater than zero"));
        }
        if !(height.is_finite() && height >= 0.0) {
            return Err(ValidationError::rule("Room height cannot be negative"));
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    pub fn is_outdoor(&self) -> bool {
        self.height == 0.0
    }

    pub fn is_indoor(&self) -> bool {
        self.height > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub floor: i32,
    pub dimensions: RoomDimensions,
    pub house_id: HouseId,
}

impl Room {
    pub fn new(
        name: &str,
        floor: i32,
        dimensions: RoomDimensions,
        house_id: HouseId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RoomId::new(),
            name: non_blank(name, "Room name")?,
            floor,
            dimensions,
            house_id,
        })
    }
}
