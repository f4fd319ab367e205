use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{DeviceId, Sensor, SensorId, SensorTypeId};
use crate::repository::{DeviceRepository, Repositories, SensorRepository, SensorTypeRepository};

#[derive(Clone)]
pub struct SensorService {
    devices: Arc<dyn DeviceRepository>,
    sensor_types: Arc<dyn SensorTypeRepository>,
    sensors: Arc<dyn SensorRepository>,
}

impl SensorService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            devices: repos.devices.clone(),
            sensor_types: repos.sensor_types.clone(),
            sensors: repos.sensors.clone(),
        }
    }

    /// The device must exist and be active, and the type must be in the catalogue.
    pub async fn add(
        &self,
        name: &str,
        device_id: DeviceId,
        sensor_type_id: SensorTypeId,
    ) -> ServiceResult<Sensor> {
        let active = self
            .devices
            .find_by_id(device_id)
            .await?
            .is_some_and(|d| d.active);
        if !active {
            return Err(ServiceError::rule(format!(
                "Device with ID: {} is not active.",
                device_id
            )));
        }
        if !self.sensor_types.is_present(&sensor_type_id).await? {
            return Err(ServiceError::rule(format!(
                "Sensor type with ID {} is not present.",
                sensor_type_id
            )));
        }
        let sensor = Sensor::new(name, device_id, sensor_type_id)?;
        if !self.sensors.save(&sensor).await? {
            return Err(ServiceError::NotSaved("Sensor"));
        }
        tracing::info!(sensor_id = %sensor.id, device_id = %device_id, sensor_type = %sensor.sensor_type_id, "Sensor added");
        Ok(sensor)
    }

    pub async fn get(&self, id: SensorId) -> ServiceResult<Sensor> {
        self.sensors
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Sensor"))
    }

    pub async fn by_device(&self, device_id: DeviceId) -> ServiceResult<Vec<Sensor>> {
        if self.devices.find_by_id(device_id).await?.is_none() {
            return Err(ServiceError::rule("Device not found"));
        }
        Ok(self.sensors.find_by_device(device_id).await?)
    }
}
