// Log service: reading storage, listings and the aggregation reports
//
// Reports are plain text. "No data" outcomes are normal results, only invalid input is an error.

pub mod aggregation;

use chrono::NaiveDate;
use std::sync::Arc;

use self::aggregation::Pairing;
use crate::errors::{ServiceError, ServiceResult, ValidationError};
use crate::models::sensor::{is_sun_sensor_type, parse_reading};
use crate::models::{
    DeviceId, Gps, LogReading, ReadingValue, SUNRISE_SENSOR, SUNSET_SENSOR, SensorId,
    SensorTypeId, TEMPERATURE_SENSOR, TimeConfig, TimeStamp,
};
use crate::repository::{
    DeviceRepository, LogRepository, Repositories, RoomRepository, SensorRepository,
};
use crate::sun::{SunCalculator, SunEvent};

const NO_GRID_RECORDS: &str =
    "There are no records available from the Grid Power Meter for the given period";

/// Where the grid readings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerMeter {
    pub device_id: DeviceId,
    pub sensor_type: SensorTypeId,
}

#[derive(Clone)]
pub struct LogService {
    devices: Arc<dyn DeviceRepository>,
    rooms: Arc<dyn RoomRepository>,
    sensors: Arc<dyn SensorRepository>,
    logs: Arc<dyn LogRepository>,
    power_meter: PowerMeter,
    sun: Arc<dyn SunCalculator>,
}

enum Placement {
    Outdoor,
    Indoor,
}

impl LogService {
    pub fn new(repos: &Repositories, power_meter: PowerMeter, sun: Arc<dyn SunCalculator>) -> Self {
        Self {
            devices: repos.devices.clone(),
            rooms: repos.rooms.clone(),
            sensors: repos.sensors.clone(),
            logs: repos.logs.clone(),
            power_meter,
            sun,
        }
    }

    /// Records a reading from a sensor. The raw value is typed by the sensor's type.
    pub async fn add_log(
        &self,
        sensor_id: SensorId,
        time: TimeStamp,
        raw_value: &str,
    ) -> ServiceResult<LogReading> {
        let sensor = self
            .sensors
            .find_by_id(sensor_id)
            .await?
            .ok_or(ServiceError::NotFound("Sensor"))?;
        let value = parse_reading(&sensor.sensor_type_id, raw_value)?;
        let log = LogReading::new(
            time,
            value,
            sensor.id,
            sensor.device_id,
            sensor.sensor_type_id,
        );
        if !self.logs.save(&log).await? {
            return Err(ServiceError::NotSaved("Log"));
        }
        tracing::debug!(sensor_id = %sensor_id, time = %log.time, value = %log.value, "Log saved");
        Ok(log)
    }

    /// Readings of a device, optionally restricted to a time window.
    pub async fn find_readings(
        &self,
        device_id: DeviceId,
        config: &TimeConfig<'_>,
    ) -> ServiceResult<Vec<LogReading>> {
        if self.devices.find_by_id(device_id).await?.is_none() {
            return Err(ServiceError::rule("Device not found"));
        }
        let window = config.optional_window()?;
        Ok(self.logs.find_by_device(device_id, window).await?)
    }

    /// Largest temperature difference between an indoor and an outdoor device, read at (nearly) the same instant.
    pub async fn max_temperature_difference(
        &self,
        outdoor_id: DeviceId,
        indoor_id: DeviceId,
        config: &TimeConfig<'_>,
    ) -> ServiceResult<String> {
        if !self.is_placed(outdoor_id, Placement::Outdoor).await?
            || !self.is_placed(indoor_id, Placement::Indoor).await?
        {
            tracing::warn!(outdoor = %outdoor_id, indoor = %indoor_id, "Device location mismatch");
            return Err(ValidationError::InvalidDeviceLocation.into());
        }
        let (window, delta) = config.window_and_delta()?;

        let temperature = SensorTypeId::parse(TEMPERATURE_SENSOR)?;
        let outdoor = self
            .logs
            .find_device_readings(outdoor_id, &temperature, window)
            .await?;
        let indoor = self
            .logs
            .find_device_readings(indoor_id, &temperature, window)
            .await?;

        Ok(match aggregation::max_abs_difference(&indoor, &outdoor, delta) {
            Pairing::NoRecords => "There are no records available for the given period".to_string(),
            Pairing::NoMatches => "Readings were found within the provided time span, but with no matches within the delta provided".to_string(),
            Pairing::Peak { value, time } => format!(
                "The Maximum Temperature Difference within the selected Period was of {} Cº which happened at {}",
                value, time
            ),
        })
    }

    /// Peak house consumption: grid readings plus the output of any power source logged at (nearly) the same instant.
    pub async fn peak_power_consumption(&self, config: &TimeConfig<'_>) -> ServiceResult<String> {
        let (window, delta) = config.window_and_delta()?;
        let meter = &self.power_meter;

        let grid = self
            .logs
            .find_device_readings(meter.device_id, &meter.sensor_type, window)
            .await?;
        if grid.is_empty() {
            return Ok(NO_GRID_RECORDS.to_string());
        }

        let sources = self
            .logs
            .find_negative_readings(meter.device_id, &meter.sensor_type, window)
            .await?;
        if sources.is_empty() {
            let Some(top) = aggregation::last_max(&grid) else {
                return Ok(NO_GRID_RECORDS.to_string());
            };
            return Ok(format!(
                "The Peak Power Consumption from the Grid within the selected Period was {} Wh which happened at {} (No Power Source Device Logs were found within the selected period)",
                top.value, top.time
            ));
        }

        Ok(match aggregation::max_offset_sum(&grid, &sources, delta) {
            Pairing::NoRecords => NO_GRID_RECORDS.to_string(),
            Pairing::NoMatches => "Readings were found within the provided time span, but with no instant matches within the delta provided".to_string(),
            Pairing::Peak { value, time } => format!(
                "The Peak Power Consumption of the House within the selected Period was of {} Wh which happened at {}",
                value, time
            ),
        })
    }

    /// Computes a sunrise or sunset for the given date and place and stores it as a reading of the first
    /// sensor of that type. Returns the instant as RFC 3339 UTC.
    pub async fn sun_reading(
        &self,
        date: &str,
        latitude: &str,
        longitude: &str,
        sensor_type: &str,
    ) -> ServiceResult<String> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDateTime)?;
        let latitude: f64 = latitude
            .trim()
            .parse()
            .map_err(|_| ServiceError::rule("Invalid latitude value"))?;
        let longitude: f64 = longitude
            .trim()
            .parse()
            .map_err(|_| ServiceError::rule("Invalid longitude value"))?;
        let gps = Gps::new(latitude, longitude)?;

        if !is_sun_sensor_type(sensor_type) {
            return Err(ServiceError::rule("Could not find Sensor"));
        }
        let (event, type_id) = if sensor_type.trim().eq_ignore_ascii_case(SUNRISE_SENSOR) {
            (SunEvent::Sunrise, SUNRISE_SENSOR)
        } else {
            (SunEvent::Sunset, SUNSET_SENSOR)
        };
        let type_id = SensorTypeId::parse(type_id)?;

        let Some(sensor) = self.sensors.find_by_type(&type_id).await?.into_iter().next() else {
            return Err(ServiceError::rule(
                "No Sun Sensors (either Sunrise or Sunset) were found in the system",
            ));
        };
        let instant = self
            .sun
            .compute(event, date, gps)
            .ok_or_else(|| ServiceError::rule("Unable to compute sun time"))?;

        let value = ReadingValue::Instant(instant);
        let log = LogReading::new(
            TimeStamp::now(),
            value,
            sensor.id,
            sensor.device_id,
            type_id,
        );
        if !self.logs.save(&log).await? {
            return Err(ServiceError::NotSaved("Unable to save reading"));
        }
        tracing::info!(sensor_id = %sensor.id, event = ?event, %date, "Sun reading saved");
        Ok(value.to_string())
    }

    /// False when the device or its room cannot be resolved.
    async fn is_placed(&self, device_id: DeviceId, placement: Placement) -> ServiceResult<bool> {
        let Some(device) = self.devices.find_by_id(device_id).await? else {
            return Ok(false);
        };
        let Some(room) = self.rooms.find_by_id(device.room_id).await? else {
            return Ok(false);
        };
        Ok(match placement {
            Placement::Outdoor => room.dimensions.is_outdoor(),
            Placement::Indoor => room.dimensions.is_indoor(),
        })
    }
}
