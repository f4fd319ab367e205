// Request and response bodies. camelCase on the wire; single resources carry `_links`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    Actuator, ActuatorId, ActuatorTypeId, Device, DeviceId, House, HouseId, LogId, LogReading,
    ReadingValue, Room, RoomId, Sensor, SensorId, SensorTypeId, TimeConfig, TimeStamp,
};

/// A JSON string or number, kept as text until the domain parses it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl Scalar {
    pub fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(v) => v.to_string(),
            Scalar::Decimal(v) => format!("{:?}", v),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub href: String,
}

pub type Links = BTreeMap<&'static str, Link>;

fn links<const N: usize>(pairs: [(&'static str, String); N]) -> Links {
    pairs
        .into_iter()
        .map(|(rel, href)| (rel, Link { href }))
        .collect()
}

// --- requests ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub door: String,
    pub street: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBody {
    pub name: String,
    pub floor: i32,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBody {
    pub name: String,
    pub model: String,
    #[serde(rename = "roomID", alias = "roomId")]
    pub room_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorBody {
    pub name: String,
    pub device_id: String,
    pub sensor_type_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorBody {
    pub name: String,
    pub device_id: String,
    pub actuator_type_id: String,
    #[serde(default)]
    pub lower_limit: Option<Scalar>,
    #[serde(default)]
    pub upper_limit: Option<Scalar>,
    #[serde(default)]
    pub precision: Option<Scalar>,
}

/// Time window and delta sent with log queries. Every field is optional here; the service decides
/// which ones a query needs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConfigBody {
    #[serde(default)]
    pub initial_date: Option<String>,
    #[serde(default)]
    pub initial_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub delta_min: Option<Scalar>,
}

/// Borrowed view used by the log service; `delta` holds the text form of `deltaMin`.
pub struct OwnedTimeConfig {
    body: TimeConfigBody,
    delta: Option<String>,
}

impl From<TimeConfigBody> for OwnedTimeConfig {
    fn from(mut body: TimeConfigBody) -> Self {
        let delta = body.delta_min.take().map(Scalar::into_text);
        Self { body, delta }
    }
}

impl OwnedTimeConfig {
    pub fn as_config(&self) -> TimeConfig<'_> {
        TimeConfig {
            initial_date: self.body.initial_date.as_deref(),
            initial_time: self.body.initial_time.as_deref(),
            end_date: self.body.end_date.as_deref(),
            end_time: self.body.end_time.as_deref(),
            delta: self.delta.as_deref(),
        }
    }
}

// --- responses ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseView {
    pub id: HouseId,
    pub door: String,
    pub street: String,
    pub city: String,
    pub country: &'static str,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<House> for HouseView {
    fn from(house: House) -> Self {
        let address = house.location.address;
        let gps = house.location.gps;
        Self {
            id: house.id,
            door: address.door,
            street: address.street,
            city: address.city,
            country: address.country.as_str(),
            postal_code: address.postal_code,
            latitude: gps.latitude,
            longitude: gps.longitude,
            links: links([("self", "/house".to_string())]),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: RoomId,
    pub name: String,
    pub floor: i32,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub house_id: HouseId,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            links: links([
                ("self", format!("/rooms/{}", room.id)),
                ("devices", format!("/devices?roomID={}", room.id)),
            ]),
            id: room.id,
            name: room.name,
            floor: room.floor,
            length: room.dimensions.length,
            width: room.dimensions.width,
            height: room.dimensions.height,
            house_id: room.house_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub id: DeviceId,
    pub name: String,
    pub model: String,
    pub active: bool,
    pub room_id: RoomId,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Device> for DeviceView {
    fn from(device: Device) -> Self {
        Self {
            links: links([
                ("self", format!("/devices/{}", device.id)),
                ("room", format!("/rooms/{}", device.room_id)),
            ]),
            id: device.id,
            name: device.name,
            model: device.model,
            active: device.active,
            room_id: device.room_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorView {
    pub id: SensorId,
    pub name: String,
    pub device_id: DeviceId,
    pub sensor_type_id: SensorTypeId,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Sensor> for SensorView {
    fn from(sensor: Sensor) -> Self {
        Self {
            links: links([
                ("self", format!("/sensors/{}", sensor.id)),
                ("device", format!("/devices/{}", sensor.device_id)),
            ]),
            id: sensor.id,
            name: sensor.name,
            device_id: sensor.device_id,
            sensor_type_id: sensor.sensor_type_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorView {
    pub id: ActuatorId,
    pub name: String,
    pub actuator_type_id: ActuatorTypeId,
    pub device_id: DeviceId,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Actuator> for ActuatorView {
    fn from(actuator: Actuator) -> Self {
        let (lower_limit, upper_limit, precision) = match actuator.settings.limits() {
            Some((lower, upper, precision)) => (Some(lower), Some(upper), precision),
            None => (None, None, None),
        };
        Self {
            links: links([
                ("self", format!("/actuators/{}", actuator.id)),
                ("ExecuteCommand", format!("/actuators/{}/act", actuator.id)),
            ]),
            id: actuator.id,
            name: actuator.name,
            actuator_type_id: actuator.actuator_type_id,
            device_id: actuator.device_id,
            status: actuator.status,
            lower_limit,
            upper_limit,
            precision,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    pub id: LogId,
    pub time: TimeStamp,
    pub value: ReadingValue,
    pub sensor_id: SensorId,
    pub device_id: DeviceId,
    pub sensor_type_id: SensorTypeId,
}

impl From<LogReading> for LogView {
    fn from(log: LogReading) -> Self {
        Self {
            id: log.id,
            time: log.time,
            value: log.value,
            sensor_id: log.sensor_id,
            device_id: log.device_id,
            sensor_type_id: log.sensor_type_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActuatorTypeView {
    pub id: ActuatorTypeId,
}
