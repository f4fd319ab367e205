// Repository traits consumed by the services. SQLite and in-memory implementations.
// `save` returns Ok(false) when the id already exists; `update` returns Ok(false) when it does not.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{
    Actuator, ActuatorId, ActuatorTypeId, Device, DeviceId, House, LogReading, Room, RoomId,
    Sensor, SensorId, SensorType, SensorTypeId, TimeWindow,
};

#[async_trait]
pub trait HouseRepository: Send + Sync {
    async fn save(&self, house: &House) -> anyhow::Result<bool>;
    async fn update(&self, house: &House) -> anyhow::Result<bool>;
    /// The installation manages a single house.
    async fn find(&self) -> anyhow::Result<Option<House>>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn save(&self, room: &Room) -> anyhow::Result<bool>;
    async fn find_by_id(&self, id: RoomId) -> anyhow::Result<Option<Room>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Room>>;
}

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn save(&self, device: &Device) -> anyhow::Result<bool>;
    async fn update(&self, device: &Device) -> anyhow::Result<bool>;
    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Device>>;
    async fn find_by_room(&self, room_id: RoomId) -> anyhow::Result<Vec<Device>>;
}

#[async_trait]
pub trait SensorTypeRepository: Send + Sync {
    async fn save(&self, sensor_type: &SensorType) -> anyhow::Result<bool>;
    async fn find_all(&self) -> anyhow::Result<Vec<SensorType>>;
    async fn is_present(&self, id: &SensorTypeId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait ActuatorTypeRepository: Send + Sync {
    async fn save(&self, id: &ActuatorTypeId) -> anyhow::Result<bool>;
    async fn find_all(&self) -> anyhow::Result<Vec<ActuatorTypeId>>;
    async fn is_present(&self, id: &ActuatorTypeId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait SensorRepository: Send + Sync {
    async fn save(&self, sensor: &Sensor) -> anyhow::Result<bool>;
    async fn find_by_id(&self, id: SensorId) -> anyhow::Result<Option<Sensor>>;
    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Sensor>>;
    async fn find_by_type(&self, sensor_type_id: &SensorTypeId) -> anyhow::Result<Vec<Sensor>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Sensor>>;
}

#[async_trait]
pub trait ActuatorRepository: Send + Sync {
    async fn save(&self, actuator: &Actuator) -> anyhow::Result<bool>;
    async fn update(&self, actuator: &Actuator) -> anyhow::Result<bool>;
    async fn find_by_id(&self, id: ActuatorId) -> anyhow::Result<Option<Actuator>>;
    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Actuator>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Actuator>>;
}

/// All log queries return readings in ascending time order.
#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn save(&self, log: &LogReading) -> anyhow::Result<bool>;

    async fn find_by_device(
        &self,
        device_id: DeviceId,
        window: Option<TimeWindow>,
    ) -> anyhow::Result<Vec<LogReading>>;

    /// Readings of one sensor type from one device, inside the window.
    async fn find_device_readings(
        &self,
        device_id: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>>;

    /// Negative readings of one sensor type from every device except `excluded`, inside the window.
    async fn find_negative_readings(
        &self,
        excluded: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>>;
}

/// One handle per repository, shared by services and the bootstrap seed.
#[derive(Clone)]
pub struct Repositories {
    pub houses: Arc<dyn HouseRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub devices: Arc<dyn DeviceRepository>,
    pub sensor_types: Arc<dyn SensorTypeRepository>,
    pub actuator_types: Arc<dyn ActuatorTypeRepository>,
    pub sensors: Arc<dyn SensorRepository>,
    pub actuators: Arc<dyn ActuatorRepository>,
    pub logs: Arc<dyn LogRepository>,
}

impl Repositories {
    /// Every trait backed by the same SQLite pool.
    pub fn sqlite(repo: sqlite::SqliteRepo) -> Self {
        let repo = Arc::new(repo);
        Self {
            houses: repo.clone(),
            rooms: repo.clone(),
            devices: repo.clone(),
            sensor_types: repo.clone(),
            actuator_types: repo.clone(),
            sensors: repo.clone(),
            actuators: repo.clone(),
            logs: repo,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(memory::MemoryRepo::default()))
    }

    /// Keeps the caller's handle so tests can inspect the fake afterwards.
    pub fn from_memory(repo: Arc<memory::MemoryRepo>) -> Self {
        Self {
            houses: repo.clone(),
            rooms: repo.clone(),
            devices: repo.clone(),
            sensor_types: repo.clone(),
            actuator_types: repo.clone(),
            sensors: repo.clone(),
            actuators: repo.clone(),
            logs: repo,
        }
    }
}
