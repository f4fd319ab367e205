// Application services: validation and orchestration over the repository traits

mod actuator;
mod catalogue;
mod device;
mod house;
pub mod log;
mod room;
mod sensor;

pub use actuator::ActuatorService;
pub use catalogue::CatalogueService;
pub use device::DeviceService;
pub use house::HouseService;
pub use log::{LogService, PowerMeter};
pub use room::RoomService;
pub use sensor::SensorService;

use std::sync::Arc;

use crate::repository::Repositories;
use crate::sun::SunCalculator;

/// Every service, built once over the same repositories.
#[derive(Clone)]
pub struct Services {
    pub house: HouseService,
    pub rooms: RoomService,
    pub devices: DeviceService,
    pub catalogue: CatalogueService,
    pub sensors: SensorService,
    pub actuators: ActuatorService,
    pub logs: LogService,
}

impl Services {
    pub fn new(repos: &Repositories, power_meter: PowerMeter, sun: Arc<dyn SunCalculator>) -> Self {
        Self {
            house: HouseService::new(repos),
            rooms: RoomService::new(repos),
            devices: DeviceService::new(repos),
            catalogue: CatalogueService::new(repos),
            sensors: SensorService::new(repos),
            actuators: ActuatorService::new(repos),
            logs: LogService::new(repos, power_meter, sun),
        }
    }
}
