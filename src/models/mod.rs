// Domain models: value objects validate on construction, entities are plain structs

mod actuator;
mod device;
mod house;
mod ids;
mod log;
pub mod reading;
mod room;
pub mod sensor;
mod time;

pub use actuator::{
    ACTUATOR_CATALOGUE, Actuator, ActuatorKind, DECIMAL_VALUE_ACTUATOR, INTEGER_VALUE_ACTUATOR,
    ROLLER_BLIND_ACTUATOR, RawSettings, SWITCH_ACTUATOR, Settings,
};
pub use device::Device;
pub use house::{Address, Country, Gps, House, Location};
pub use ids::{ActuatorId, ActuatorTypeId, DeviceId, HouseId, LogId, RoomId, SensorId, SensorTypeId};
pub use log::LogReading;
pub use reading::ReadingValue;
pub use room::{Room, RoomDimensions};
pub use sensor::{
    ENERGY_CONSUMPTION_SENSOR, SENSOR_CATALOGUE, SUNRISE_SENSOR, SUNSET_SENSOR, Sensor, SensorType,
    TEMPERATURE_SENSOR,
};
pub use time::{Delta, TIMESTAMP_FORMAT, TimeConfig, TimeStamp, TimeWindow};

use crate::errors::ValidationError;

/// Trims and rejects empty text fields.
pub(crate) fn non_blank(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(value.to_string())
}
