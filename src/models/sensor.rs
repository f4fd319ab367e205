// Sensors, sensor types and the reading rules each type imposes

use serde::Serialize;

use super::{DeviceId, ReadingValue, SensorId, SensorTypeId, non_blank};
use crate::errors::ValidationError;

pub const TEMPERATURE_SENSOR: &str = "TemperatureSensor";
pub const ENERGY_CONSUMPTION_SENSOR: &str = "EnergyConsumptionSensor";
pub const SUNRISE_SENSOR: &str = "SunriseSensor";
pub const SUNSET_SENSOR: &str = "SunsetSensor";

/// How raw readings of a sensor type are parsed and bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    Decimal,
    Integer,
    NonNegative,
    Percentage,
    Binary,
    Instant,
}

/// Known sensor types: `(id, unit, rule)`. Seeded into the sensor type repository.
pub const SENSOR_CATALOGUE: &[(&str, &str, ValueRule)] = &[
    (TEMPERATURE_SENSOR, "C", ValueRule::Decimal),
    ("HumiditySensor", "%", ValueRule::Percentage),
    ("PositionSensor", "%", ValueRule::Percentage),
    (ENERGY_CONSUMPTION_SENSOR, "Wh", ValueRule::Integer),
    ("PowerConsumptionSensor", "W", ValueRule::Integer),
    ("AveragePowerConsumptionSensor", "W", ValueRule::Integer),
    ("DewPointSensor", "C", ValueRule::Decimal),
    ("SolarIrradianceSensor", "W/m2", ValueRule::NonNegative),
    ("SwitchSensor", "binary", ValueRule::Binary),
    ("WindSensor", "km/h", ValueRule::Decimal),
    (SUNRISE_SENSOR, "time", ValueRule::Instant),
    (SUNSET_SENSOR, "time", ValueRule::Instant),
];

pub fn value_rule(sensor_type: &SensorTypeId) -> Option<ValueRule> {
    SENSOR_CATALOGUE
        .iter()
        .find(|(id, _, _)| *id == sensor_type.as_str())
        .map(|(_, _, rule)| *rule)
}

/// Parses a raw reading for the given sensor type. Unknown types fall back to decimal.
pub fn parse_reading(sensor_type: &SensorTypeId, raw: &str) -> Result<ReadingValue, ValidationError> {
    let raw = raw.trim();
    let invalid = || ValidationError::rule(format!("Invalid reading for {}: {}", sensor_type, raw));
    let integer = || raw.parse::<i64>().map_err(|_| invalid());
    match value_rule(sensor_type).unwrap_or(ValueRule::Decimal) {
        ValueRule::Decimal => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ReadingValue::Decimal)
            .ok_or_else(invalid),
        ValueRule::Integer => integer().map(ReadingValue::Integer),
        ValueRule::NonNegative => match integer()? {
            v if v >= 0 => Ok(ReadingValue::Integer(v)),
            _ => Err(invalid()),
        },
        ValueRule::Percentage => match integer()? {
            v @ 0..=100 => Ok(ReadingValue::Integer(v)),
            _ => Err(invalid()),
        },
        ValueRule::Binary => match integer()? {
            v @ (0 | 1) => Ok(ReadingValue::Integer(v)),
            _ => Err(invalid()),
        },
        ValueRule::Instant => ReadingValue::from_parts(super::reading::KIND_INSTANT, raw),
    }
}

pub fn is_sun_sensor_type(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case(SUNRISE_SENSOR) || raw.eq_ignore_ascii_case(SUNSET_SENSOR)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorType {
    pub id: SensorTypeId,
    pub unit: String,
}

impl SensorType {
    pub fn new(id: SensorTypeId, unit: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            unit: non_blank(unit, "Unit")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub device_id: DeviceId,
    pub sensor_type_id: SensorTypeId,
}

impl Sensor {
    pub fn new(
        name: &str,
        device_id: DeviceId,
        sensor_type_id: SensorTypeId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: SensorId::new(),
            name: non_blank(name, "Sensor name")?,
            device_id,
            sensor_type_id,
        })
    }
}
