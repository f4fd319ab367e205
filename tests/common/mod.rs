// Shared test helpers

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use smarthome::bootstrap;
use smarthome::models::{
    Device, DeviceId, ENERGY_CONSUMPTION_SENSOR, Gps, Sensor, SensorTypeId, TimeConfig,
};
use smarthome::repository::Repositories;
use smarthome::repository::memory::MemoryRepo;
use smarthome::services::{PowerMeter, Services};
use smarthome::sun::{NoaaSunCalculator, SunCalculator, SunEvent};
use std::sync::Arc;

/// Always answers with the same instant.
pub struct FixedSun(pub DateTime<Utc>);

impl SunCalculator for FixedSun {
    fn compute(&self, _event: SunEvent, _date: NaiveDate, _gps: Gps) -> Option<DateTime<Utc>> {
        Some(self.0)
    }
}

/// Never finds the event (polar day or night).
pub struct NoSun;

impl SunCalculator for NoSun {
    fn compute(&self, _event: SunEvent, _date: NaiveDate, _gps: Gps) -> Option<DateTime<Utc>> {
        None
    }
}

/// In-memory repositories with the bootstrap seed applied.
pub struct Home {
    pub memory: Arc<MemoryRepo>,
    pub repos: Repositories,
    pub services: Services,
    pub grid: DeviceId,
}

pub async fn seeded_home() -> Home {
    seeded_home_with_sun(Arc::new(NoaaSunCalculator)).await
}

pub async fn seeded_home_with_sun(sun: Arc<dyn SunCalculator>) -> Home {
    let memory = Arc::new(MemoryRepo::default());
    let repos = Repositories::from_memory(memory.clone());
    let grid = bootstrap::run(&repos).await.unwrap().unwrap();
    let power_meter = PowerMeter {
        device_id: grid,
        sensor_type: SensorTypeId::parse(ENERGY_CONSUMPTION_SENSOR).unwrap(),
    };
    let services = Services::new(&repos, power_meter, sun);
    Home {
        memory,
        repos,
        services,
        grid,
    }
}

pub async fn device_named(repos: &Repositories, name: &str) -> Device {
    repos
        .devices
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("no device named {}", name))
}

pub async fn sensor_named(repos: &Repositories, device_id: DeviceId, name: &str) -> Sensor {
    repos
        .sensors
        .find_by_device(device_id)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no sensor named {}", name))
}

/// Window spanning `start` to `end` (`YYYY-MM-DD HH:MM`) with an optional delta.
pub fn window(
    start: &'static str,
    end: &'static str,
    delta: Option<&'static str>,
) -> TimeConfig<'static> {
    let (start_date, start_time) = start.split_once(' ').unwrap();
    let (end_date, end_time) = end.split_once(' ').unwrap();
    TimeConfig {
        initial_date: Some(start_date),
        initial_time: Some(start_time),
        end_date: Some(end_date),
        end_time: Some(end_time),
        delta,
    }
}
