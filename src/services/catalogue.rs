use std::sync::Arc;

use crate::errors::ServiceResult;
use crate::models::{ActuatorTypeId, SensorType};
use crate::repository::{ActuatorTypeRepository, Repositories, SensorTypeRepository};

/// Read side of the sensor and actuator type catalogue.
#[derive(Clone)]
pub struct CatalogueService {
    sensor_types: Arc<dyn SensorTypeRepository>,
    actuator_types: Arc<dyn ActuatorTypeRepository>,
}

impl CatalogueService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            sensor_types: repos.sensor_types.clone(),
            actuator_types: repos.actuator_types.clone(),
        }
    }

    pub async fn sensor_types(&self) -> ServiceResult<Vec<SensorType>> {
        Ok(self.sensor_types.find_all().await?)
    }

    pub async fn actuator_types(&self) -> ServiceResult<Vec<ActuatorTypeId>> {
        Ok(self.actuator_types.find_all().await?)
    }
}
