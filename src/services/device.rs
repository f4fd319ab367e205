use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{Device, DeviceId, RoomId};
use crate::repository::{
    ActuatorRepository, DeviceRepository, Repositories, RoomRepository, SensorRepository,
};

#[derive(Clone)]
pub struct DeviceService {
    rooms: Arc<dyn RoomRepository>,
    devices: Arc<dyn DeviceRepository>,
    sensors: Arc<dyn SensorRepository>,
    actuators: Arc<dyn ActuatorRepository>,
}

impl DeviceService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            rooms: repos.rooms.clone(),
            devices: repos.devices.clone(),
            sensors: repos.sensors.clone(),
            actuators: repos.actuators.clone(),
        }
    }

    pub async fn add(&self, name: &str, model: &str, room_id: RoomId) -> ServiceResult<Device> {
        if self.rooms.find_by_id(room_id).await?.is_none() {
            return Err(ServiceError::rule("Room not found"));
        }
        let device = Device::new(name, model, room_id)?;
        if !self.devices.save(&device).await? {
            return Err(ServiceError::NotSaved("Device"));
        }
        tracing::info!(device_id = %device.id, room_id = %room_id, "Device added");
        Ok(device)
    }

    pub async fn get(&self, id: DeviceId) -> ServiceResult<Device> {
        self.devices
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Device"))
    }

    pub async fn by_room(&self, room_id: RoomId) -> ServiceResult<Vec<Device>> {
        if self.rooms.find_by_id(room_id).await?.is_none() {
            return Err(ServiceError::rule("Room not found"));
        }
        Ok(self.devices.find_by_room(room_id).await?)
    }

    pub async fn deactivate(&self, id: DeviceId) -> ServiceResult<Device> {
        let mut device = self.get(id).await?;
        device.deactivate()?;
        if !self.devices.update(&device).await? {
            return Err(ServiceError::NotSaved("Device"));
        }
        tracing::info!(device_id = %id, "Device deactivated");
        Ok(device)
    }

    /// Groups devices by the sensor and actuator types they carry. A device appears once per type.
    pub async fn by_functionality(&self) -> ServiceResult<BTreeMap<String, Vec<Device>>> {
        let devices: HashMap<DeviceId, Device> = self
            .devices
            .find_all()
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        let mut pairs: Vec<(String, DeviceId)> = Vec::new();
        for sensor in self.sensors.find_all().await? {
            pairs.push((sensor.sensor_type_id.to_string(), sensor.device_id));
        }
        for actuator in self.actuators.find_all().await? {
            pairs.push((actuator.actuator_type_id.to_string(), actuator.device_id));
        }

        let mut grouped: BTreeMap<String, Vec<Device>> = BTreeMap::new();
        for (functionality, device_id) in pairs {
            let Some(device) = devices.get(&device_id) else {
                continue;
            };
            let entry = grouped.entry(functionality).or_default();
            if !entry.iter().any(|d| d.id == device_id) {
                entry.push(device.clone());
            }
        }
        Ok(grouped)
    }
}
