// Devices: hardware units placed in a room, carrying sensors and actuators

use super::{DeviceId, RoomId, non_blank};
use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub model: String,
    pub active: bool,
    pub room_id: RoomId,
}

impl Device {
    /// New devices start active.
    pub fn new(name: &str, model: &str, room_id: RoomId) -> Result<Self, ValidationError> {
        Ok(Self {
            id: DeviceId::new(),
            name: non_blank(name, "Device name")?,
            model: non_blank(model, "Device model")?,
            active: true,
            room_id,
        })
    }

    pub fn deactivate(&mut self) -> Result<(), ValidationError> {
        if !self.active {
            return Err(ValidationError::rule("Device is already deactivated"));
        }
        self.active = false;
        Ok(())
    }
}
