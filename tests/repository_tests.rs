// SqliteRepo tests: connect, init, save/find/update per table, log queries, bootstrap on disk

use smarthome::bootstrap;
use smarthome::models::*;
use smarthome::repository::Repositories;
use smarthome::repository::sqlite::SqliteRepo;
use tempfile::TempDir;

async fn open(dir: &TempDir) -> Repositories {
    let path = dir.path().join("smarthome.db");
    let repo = SqliteRepo::connect(path.to_str().unwrap(), 2).await.unwrap();
    repo.init().await.unwrap();
    Repositories::sqlite(repo)
}

fn log(at: &str, value: ReadingValue, device: DeviceId, sensor_type: &str) -> LogReading {
    LogReading::new(
        TimeStamp::parse_iso(at).unwrap(),
        value,
        SensorId::new(),
        device,
        SensorTypeId::parse(sensor_type).unwrap(),
    )
}

#[tokio::test]
async fn sqlite_repo_connect_and_init_twice() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("smarthome.db");
    let repo = SqliteRepo::connect(path.to_str().unwrap(), 1).await.unwrap();
    repo.init().await.unwrap();
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
    let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(tables, 8);
}

#[tokio::test]
async fn house_save_update_and_find() {
    let dir = TempDir::new().unwrap();
    let repos = open(&dir).await;
    assert!(repos.houses.find().await.unwrap().is_none());

    let location = Location {
        address: Address::new("12", "Rua Nova", "Porto", "Portugal", "PT-4000-123").unwrap(),
        gps: Gps::new(41.15, -8.61).unwrap(),
    };
    let mut house = House::new(location);
    assert!(repos.houses.save(&house).await.unwrap());
    assert!(!repos.houses.save(&house).await.unwrap());

    house.location.gps = Gps::new(41.0, -8.0).unwrap();
    assert!(repos.houses.update(&house).await.unwrap());
    assert_eq!(repos.houses.find().await.unwrap(), Some(house));
}

#[tokio::test]
async fn device_update_of_missing_row_reports_false() {
    let dir = TempDir::new().unwrap();
    let repos = open(&dir).await;
    let room = Room::new("Attic", 2, RoomDimensions::new(3.0, 4.0, 2.5).unwrap(), HouseId::new()).unwrap();
    repos.rooms.save(&room).await.unwrap();

    let mut device = Device::new("Heater", "H-1", room.id).unwrap();
    assert!(!repos.devices.update(&device).await.unwrap());
    assert!(repos.devices.save(&device).await.unwrap());

    device.deactivate().unwrap();
    assert!(repos.devices.update(&device).await.unwrap());
    let stored = repos.devices.find_by_id(device.id).await.unwrap().unwrap();
    assert!(!stored.active);
    assert_eq!(repos.devices.find_by_room(room.id).await.unwrap(), vec![stored]);
}

#[tokio::test]
async fn actuator_settings_survive_storage() {
    let dir = TempDir::new().unwrap();
    let repos = open(&dir).await;
    let settings = RawSettings {
        lower_limit: Some("10.5"),
        upper_limit: Some("30.5"),
        precision: Some("0.01"),
    };
    let mut actuator = Actuator::new(
        "Thermostat",
        ActuatorTypeId::parse(DECIMAL_VALUE_ACTUATOR).unwrap(),
        DeviceId::new(),
        &settings,
    )
    .unwrap();
    repos.actuators.save(&actuator).await.unwrap();
    actuator.execute("21.25").unwrap();
    assert!(repos.actuators.update(&actuator).await.unwrap());

    let stored = repos.actuators.find_by_id(actuator.id).await.unwrap().unwrap();
    assert_eq!(stored, actuator);
    assert_eq!(stored.status, "21.25");
}

#[tokio::test]
async fn log_queries_are_ordered_and_window_inclusive() {
    let dir = TempDir::new().unwrap();
    let repos = open(&dir).await;
    let grid = DeviceId::new();
    let source = DeviceId::new();
    for reading in [
        log("2024-01-01T12:10:00", ReadingValue::Integer(50), grid, ENERGY_CONSUMPTION_SENSOR),
        log("2024-01-01T12:00:00", ReadingValue::Integer(100), grid, ENERGY_CONSUMPTION_SENSOR),
        log("2024-01-01T12:20:00", ReadingValue::Integer(75), grid, ENERGY_CONSUMPTION_SENSOR),
        log("2024-01-01T12:05:00", ReadingValue::Decimal(21.5), grid, TEMPERATURE_SENSOR),
        log("2024-01-01T12:03:00", ReadingValue::Integer(-25), source, ENERGY_CONSUMPTION_SENSOR),
        log("2024-01-01T12:04:00", ReadingValue::Integer(10), source, ENERGY_CONSUMPTION_SENSOR),
        log("2024-01-01T12:06:00", ReadingValue::Integer(-5), grid, ENERGY_CONSUMPTION_SENSOR),
    ] {
        assert!(repos.logs.save(&reading).await.unwrap());
    }

    let window = TimeWindow::new(
        TimeStamp::parse_iso("2024-01-01T12:00:00").unwrap(),
        TimeStamp::parse_iso("2024-01-01T12:10:00").unwrap(),
    )
    .unwrap();
    let energy = SensorTypeId::parse(ENERGY_CONSUMPTION_SENSOR).unwrap();

    let readings = repos
        .logs
        .find_device_readings(grid, &energy, window)
        .await
        .unwrap();
    let times: Vec<String> = readings.iter().map(|l| l.time.to_string()).collect();
    assert_eq!(
        times,
        ["2024-01-01T12:00:00", "2024-01-01T12:06:00", "2024-01-01T12:10:00"]
    );

    let negative = repos
        .logs
        .find_negative_readings(grid, &energy, window)
        .await
        .unwrap();
    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].value, ReadingValue::Integer(-25));

    let all = repos.logs.find_by_device(grid, None).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[1].value, ReadingValue::Decimal(21.5));
}

#[tokio::test]
async fn bootstrap_seeds_once() {
    let dir = TempDir::new().unwrap();
    let repos = open(&dir).await;

    let grid = bootstrap::run(&repos).await.unwrap().unwrap();
    assert_eq!(repos.rooms.find_all().await.unwrap().len(), 3);
    assert_eq!(repos.sensor_types.find_all().await.unwrap().len(), SENSOR_CATALOGUE.len());

    // A second run finds the existing house and returns the same meter.
    assert_eq!(bootstrap::run(&repos).await.unwrap(), Some(grid));
    assert_eq!(repos.devices.find_all().await.unwrap().len(), 5);
    assert_eq!(repos.actuator_types.find_all().await.unwrap().len(), ACTUATOR_CATALOGUE.len());
}
