// In-memory repositories for tests and throwaway runs.
// Insertion order is kept; log queries are counted and writes can be switched off.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{
    ActuatorRepository, ActuatorTypeRepository, DeviceRepository, HouseRepository, LogRepository,
    RoomRepository, SensorRepository, SensorTypeRepository,
};
use crate::models::{
    Actuator, ActuatorId, ActuatorTypeId, Device, DeviceId, House, LogReading, Room, RoomId,
    Sensor, SensorId, SensorType, SensorTypeId, TimeWindow,
};

#[derive(Default)]
pub struct MemoryRepo {
    houses: RwLock<Vec<House>>,
    rooms: RwLock<Vec<Room>>,
    devices: RwLock<Vec<Device>>,
    sensor_types: RwLock<Vec<SensorType>>,
    actuator_types: RwLock<Vec<ActuatorTypeId>>,
    sensors: RwLock<Vec<Sensor>>,
    actuators: RwLock<Vec<Actuator>>,
    logs: RwLock<Vec<LogReading>>,
    log_queries: AtomicUsize,
    reject_writes: AtomicBool,
}

impl MemoryRepo {
    /// Number of log read queries served so far.
    pub fn log_query_count(&self) -> usize {
        self.log_queries.load(Ordering::Relaxed)
    }

    /// When set, every save/update reports false, as a refusing store would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Relaxed);
    }

    fn rejects(&self) -> bool {
        self.reject_writes.load(Ordering::Relaxed)
    }

    fn count_log_query(&self) {
        self.log_queries.fetch_add(1, Ordering::Relaxed);
    }
}

async fn insert_unique<T: Clone, K: PartialEq>(
    store: &RwLock<Vec<T>>,
    item: &T,
    key: impl Fn(&T) -> K,
) -> bool {
    let mut items = store.write().await;
    if items.iter().any(|existing| key(existing) == key(item)) {
        return false;
    }
    items.push(item.clone());
    true
}

async fn replace<T: Clone, K: PartialEq>(
    store: &RwLock<Vec<T>>,
    item: &T,
    key: impl Fn(&T) -> K,
) -> bool {
    let mut items = store.write().await;
    match items.iter_mut().find(|existing| key(existing) == key(item)) {
        Some(slot) => {
            *slot = item.clone();
            true
        }
        None => false,
    }
}

fn sorted_by_time(mut logs: Vec<LogReading>) -> Vec<LogReading> {
    logs.sort_by_key(|l| l.time);
    logs
}

#[async_trait]
impl HouseRepository for MemoryRepo {
    async fn save(&self, house: &House) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.houses, house, |h| h.id).await)
    }

    async fn update(&self, house: &House) -> anyhow::Result<bool> {
        Ok(!self.rejects() && replace(&self.houses, house, |h| h.id).await)
    }

    async fn find(&self) -> anyhow::Result<Option<House>> {
        Ok(self.houses.read().await.first().cloned())
    }
}

#[async_trait]
impl RoomRepository for MemoryRepo {
    async fn save(&self, room: &Room) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.rooms, room, |r| r.id).await)
    }

    async fn find_by_id(&self, id: RoomId) -> anyhow::Result<Option<Room>> {
        Ok(self.rooms.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Room>> {
        Ok(self.rooms.read().await.clone())
    }
}

#[async_trait]
impl DeviceRepository for MemoryRepo {
    async fn save(&self, device: &Device) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.devices, device, |d| d.id).await)
    }

    async fn update(&self, device: &Device) -> anyhow::Result<bool> {
        Ok(!self.rejects() && replace(&self.devices, device, |d| d.id).await)
    }

    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>> {
        Ok(self.devices.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Device>> {
        Ok(self.devices.read().await.clone())
    }

    async fn find_by_room(&self, room_id: RoomId) -> anyhow::Result<Vec<Device>> {
        let devices = self.devices.read().await;
        Ok(devices.iter().filter(|d| d.room_id == room_id).cloned().collect())
    }
}

#[async_trait]
impl SensorTypeRepository for MemoryRepo {
    async fn save(&self, sensor_type: &SensorType) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.sensor_types, sensor_type, |t| t.id.clone()).await)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<SensorType>> {
        Ok(self.sensor_types.read().await.clone())
    }

    async fn is_present(&self, id: &SensorTypeId) -> anyhow::Result<bool> {
        Ok(self.sensor_types.read().await.iter().any(|t| &t.id == id))
    }
}

#[async_trait]
impl ActuatorTypeRepository for MemoryRepo {
    async fn save(&self, id: &ActuatorTypeId) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.actuator_types, id, Clone::clone).await)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<ActuatorTypeId>> {
        Ok(self.actuator_types.read().await.clone())
    }

    async fn is_present(&self, id: &ActuatorTypeId) -> anyhow::Result<bool> {
        Ok(self.actuator_types.read().await.contains(id))
    }
}

#[async_trait]
impl SensorRepository for MemoryRepo {
    async fn save(&self, sensor: &Sensor) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.sensors, sensor, |s| s.id).await)
    }

    async fn find_by_id(&self, id: SensorId) -> anyhow::Result<Option<Sensor>> {
        Ok(self.sensors.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Sensor>> {
        let sensors = self.sensors.read().await;
        Ok(sensors.iter().filter(|s| s.device_id == device_id).cloned().collect())
    }

    async fn find_by_type(&self, sensor_type_id: &SensorTypeId) -> anyhow::Result<Vec<Sensor>> {
        let sensors = self.sensors.read().await;
        Ok(sensors
            .iter()
            .filter(|s| &s.sensor_type_id == sensor_type_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Sensor>> {
        Ok(self.sensors.read().await.clone())
    }
}

#[async_trait]
impl ActuatorRepository for MemoryRepo {
    async fn save(&self, actuator: &Actuator) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.actuators, actuator, |a| a.id).await)
    }

    async fn update(&self, actuator: &Actuator) -> anyhow::Result<bool> {
        Ok(!self.rejects() && replace(&self.actuators, actuator, |a| a.id).await)
    }

    async fn find_by_id(&self, id: ActuatorId) -> anyhow::Result<Option<Actuator>> {
        Ok(self.actuators.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_device(&self, device_id: DeviceId) -> anyhow::Result<Vec<Actuator>> {
        let actuators = self.actuators.read().await;
        Ok(actuators.iter().filter(|a| a.device_id == device_id).cloned().collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Actuator>> {
        Ok(self.actuators.read().await.clone())
    }
}

#[async_trait]
impl LogRepository for MemoryRepo {
    async fn save(&self, log: &LogReading) -> anyhow::Result<bool> {
        Ok(!self.rejects() && insert_unique(&self.logs, log, |l| l.id).await)
    }

    async fn find_by_device(
        &self,
        device_id: DeviceId,
        window: Option<TimeWindow>,
    ) -> anyhow::Result<Vec<LogReading>> {
        self.count_log_query();
        let logs = self.logs.read().await;
        Ok(sorted_by_time(
            logs.iter()
                .filter(|l| l.device_id == device_id)
                .filter(|l| window.is_none_or(|w| w.contains(&l.time)))
                .cloned()
                .collect(),
        ))
    }

    async fn find_device_readings(
        &self,
        device_id: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>> {
        self.count_log_query();
        let logs = self.logs.read().await;
        Ok(sorted_by_time(
            logs.iter()
                .filter(|l| l.device_id == device_id && &l.sensor_type_id == sensor_type_id)
                .filter(|l| window.contains(&l.time))
                .cloned()
                .collect(),
        ))
    }

    async fn find_negative_readings(
        &self,
        excluded: DeviceId,
        sensor_type_id: &SensorTypeId,
        window: TimeWindow,
    ) -> anyhow::Result<Vec<LogReading>> {
        self.count_log_query();
        let logs = self.logs.read().await;
        Ok(sorted_by_time(
            logs.iter()
                .filter(|l| l.device_id != excluded && &l.sensor_type_id == sensor_type_id)
                .filter(|l| window.contains(&l.time) && l.value.is_negative())
                .cloned()
                .collect(),
        ))
    }
}
