// Log entry: one timestamped reading from a sensor

use super::{DeviceId, LogId, ReadingValue, SensorId, SensorTypeId, TimeStamp};

#[derive(Debug, Clone, PartialEq)]
pub struct LogReading {
    pub id: LogId,
    pub time: TimeStamp,
    pub value: ReadingValue,
    pub sensor_id: SensorId,
    pub device_id: DeviceId,
    pub sensor_type_id: SensorTypeId,
}

impl LogReading {
    pub fn new(
        time: TimeStamp,
        value: ReadingValue,
        sensor_id: SensorId,
        device_id: DeviceId,
        sensor_type_id: SensorTypeId,
    ) -> Self {
        Self {
            id: LogId::new(),
            time,
            value,
            sensor_id,
            device_id,
            sensor_type_id,
        }
    }
}
