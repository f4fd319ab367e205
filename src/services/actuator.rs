use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{Actuator, ActuatorId, ActuatorKind, ActuatorTypeId, DeviceId, RawSettings};
use crate::repository::{ActuatorRepository, ActuatorTypeRepository, DeviceRepository, Repositories};

#[derive(Clone)]
pub struct ActuatorService {
    devices: Arc<dyn DeviceRepository>,
    actuator_types: Arc<dyn ActuatorTypeRepository>,
    actuators: Arc<dyn ActuatorRepository>,
}

impl ActuatorService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            devices: repos.devices.clone(),
            actuator_types: repos.actuator_types.clone(),
            actuators: repos.actuators.clone(),
        }
    }

    pub async fn add(
        &self,
        name: &str,
        actuator_type_id: ActuatorTypeId,
        device_id: DeviceId,
        settings: &RawSettings<'_>,
    ) -> ServiceResult<Actuator> {
        let active = self
            .devices
            .find_by_id(device_id)
            .await?
            .is_some_and(|d| d.active);
        if !active {
            return Err(ServiceError::rule("Device is not active"));
        }
        if !self.actuator_types.is_present(&actuator_type_id).await? {
            return Err(ServiceError::rule("Actuator type is not present"));
        }
        let actuator = Actuator::new(name, actuator_type_id, device_id, settings)?;
        if !self.actuators.save(&actuator).await? {
            return Err(ServiceError::NotSaved("Actuator"));
        }
        tracing::info!(actuator_id = %actuator.id, device_id = %device_id, actuator_type = %actuator.actuator_type_id, "Actuator added");
        Ok(actuator)
    }

    pub async fn get(&self, id: ActuatorId) -> ServiceResult<Actuator> {
        self.actuators
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Actuator"))
    }

    pub async fn by_device(&self, device_id: DeviceId) -> ServiceResult<Vec<Actuator>> {
        if self.devices.find_by_id(device_id).await?.is_none() {
            return Err(ServiceError::rule("Device not found"));
        }
        Ok(self.actuators.find_by_device(device_id).await?)
    }

    /// Fully closes a roller blind (position 0). Any other actuator type is refused as unprocessable.
    pub async fn close_roller_blind(&self, id: ActuatorId) -> ServiceResult<Actuator> {
        let actuator = self.get(id).await?;
        if actuator.kind() != Some(ActuatorKind::RollerBlind) {
            tracing::warn!(actuator_id = %id, actuator_type = %actuator.actuator_type_id, "Close requested on a non roller blind");
            return Err(ServiceError::NotSaved("Actuator is not a roller blind"));
        }
        self.apply(actuator, "0").await
    }

    pub async fn execute(&self, id: ActuatorId, command: &str) -> ServiceResult<Actuator> {
        let actuator = self.get(id).await?;
        self.apply(actuator, command).await
    }

    async fn apply(&self, mut actuator: Actuator, command: &str) -> ServiceResult<Actuator> {
        actuator.execute(command)?;
        if !self.actuators.update(&actuator).await? {
            return Err(ServiceError::NotSaved("Actuator"));
        }
        tracing::info!(actuator_id = %actuator.id, status = %actuator.status, "Command executed");
        Ok(actuator)
    }
}
