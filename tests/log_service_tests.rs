// LogService tests over seeded in-memory repositories: reports, location checks, sun readings

mod common;

use chrono::{DateTime, Utc};
use common::{FixedSun, NoSun, device_named, seeded_home, seeded_home_with_sun, sensor_named, window};
use smarthome::errors::{ServiceError, ValidationError};
use smarthome::models::{ReadingValue, TimeStamp};
use std::sync::Arc;

const OUTDOOR: &str = "Garden Temperature Controller";
const INDOOR: &str = "Kitchen Temperature Controller";

async fn add_logs(home: &common::Home, device: &str, sensor: &str, points: &[(&str, &str)]) {
    let device = device_named(&home.repos, device).await;
    let sensor = sensor_named(&home.repos, device.id, sensor).await;
    for (at, value) in points {
        home.services
            .logs
            .add_log(sensor.id, TimeStamp::parse_iso(at).unwrap(), value)
            .await
            .unwrap();
    }
}

/// Five indoor and five outdoor readings around midnight of 2024-03-26.
async fn march_fixture() -> common::Home {
    let home = seeded_home().await;
    add_logs(
        &home,
        OUTDOOR,
        "Outdoor Temperature Sensor",
        &[
            ("2024-03-25T23:50:00", "13"),
            ("2024-03-26T00:00:00", "13"),
            ("2024-03-26T00:05:00", "18"),
            ("2024-03-26T00:10:00", "17"),
            ("2024-03-26T00:15:00", "15"),
        ],
    )
    .await;
    add_logs(
        &home,
        INDOOR,
        "Indoor Temperature Sensor",
        &[
            ("2024-03-25T23:00:00", "23"),
            ("2024-03-25T23:30:00", "21"),
            ("2024-03-26T00:02:01", "22"),
            ("2024-03-26T00:08:01", "25"),
            ("2024-03-26T00:19:00", "20"),
        ],
    )
    .await;
    home
}

async fn temperature_report(home: &common::Home, delta: Option<&'static str>) -> Result<String, ServiceError> {
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    home.services
        .logs
        .max_temperature_difference(
            outdoor.id,
            indoor.id,
            &window("2024-03-23 22:00", "2024-03-27 23:50", delta),
        )
        .await
}

const MARCH_PEAK: &str = "The Maximum Temperature Difference within the selected Period was of 9.0 Cº which happened at 2024-03-26T00:02:01";

#[tokio::test]
async fn temperature_difference_with_zero_delta_uses_default_tolerance() {
    let home = march_fixture().await;
    assert_eq!(temperature_report(&home, Some("0")).await.unwrap(), MARCH_PEAK);
    assert_eq!(temperature_report(&home, None).await.unwrap(), MARCH_PEAK);
    assert_eq!(temperature_report(&home, Some(" ")).await.unwrap(), MARCH_PEAK);
}

#[tokio::test]
async fn temperature_difference_with_tight_delta_has_no_matches() {
    let home = march_fixture().await;
    let report = temperature_report(&home, Some("1")).await.unwrap();
    assert_eq!(
        report,
        "Readings were found within the provided time span, but with no matches within the delta provided"
    );
}

#[tokio::test]
async fn temperature_difference_never_shrinks_as_delta_grows() {
    let home = march_fixture().await;
    let narrow = temperature_report(&home, Some("2")).await.unwrap();
    assert!(narrow.ends_with("was of 8.0 Cº which happened at 2024-03-26T00:08:01"), "{}", narrow);
    assert_eq!(temperature_report(&home, Some("10")).await.unwrap(), MARCH_PEAK);
}

#[tokio::test]
async fn temperature_difference_on_seeded_day() {
    let home = seeded_home().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    let report = home
        .services
        .logs
        .max_temperature_difference(
            outdoor.id,
            indoor.id,
            &window("2024-01-01 12:00", "2024-01-01 13:00", Some("5")),
        )
        .await
        .unwrap();
    assert!(report.ends_with("was of 5.0 Cº which happened at 2024-01-01T12:10:00"), "{}", report);
}

#[tokio::test]
async fn empty_period_has_no_records() {
    let home = march_fixture().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    let report = home
        .services
        .logs
        .max_temperature_difference(
            outdoor.id,
            indoor.id,
            &window("2023-01-01 00:00", "2023-01-02 00:00", Some("5")),
        )
        .await
        .unwrap();
    assert_eq!(report, "There are no records available for the given period");
}

#[tokio::test]
async fn swapped_devices_are_rejected_before_any_log_query() {
    let home = march_fixture().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    let before = home.memory.log_query_count();

    let err = home
        .services
        .logs
        .max_temperature_difference(
            indoor.id,
            outdoor.id,
            &window("2024-03-23 22:00", "2024-03-27 23:50", Some("3")),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidDeviceLocation)
    ));
    assert_eq!(home.memory.log_query_count(), before);
}

#[tokio::test]
async fn inverted_window_and_bad_delta_are_rejected() {
    let home = march_fixture().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    let logs = &home.services.logs;

    let err = logs
        .max_temperature_difference(
            outdoor.id,
            indoor.id,
            &window("2024-03-27 00:00", "2024-03-26 00:00", None),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid time stamps");

    let err = logs
        .max_temperature_difference(
            outdoor.id,
            indoor.id,
            &window("2024-03-26 00:00", "2024-03-27 00:00", Some("-2")),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid delta");
}

#[tokio::test]
async fn windows_ending_in_the_future_are_rejected() {
    let home = march_fixture().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let indoor = device_named(&home.repos, INDOOR).await;
    let logs = &home.services.logs;
    let future = window("2024-01-01 00:00", "2999-01-01 00:00", Some("5"));

    let err = logs.peak_power_consumption(&future).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidTimeStamps)
    ));

    let err = logs
        .max_temperature_difference(outdoor.id, indoor.id, &future)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid time stamps");
}

#[tokio::test]
async fn peak_power_adds_the_source_offset() {
    let home = seeded_home().await;
    add_logs(
        &home,
        "Grid Power Meter",
        "Energy Consumption Sensor",
        &[("2024-04-04T12:20:30", "23")],
    )
    .await;
    add_logs(
        &home,
        "Power Source",
        "Energy Consumption Sensor",
        &[("2024-04-04T12:16:30", "-3")],
    )
    .await;

    let report = home
        .services
        .logs
        .peak_power_consumption(&window("2024-04-04 12:00", "2024-04-04 13:00", Some("10")))
        .await
        .unwrap();
    assert_eq!(
        report,
        "The Peak Power Consumption of the House within the selected Period was of 26 Wh which happened at 2024-04-04T12:20:30"
    );

    let report = home
        .services
        .logs
        .peak_power_consumption(&window("2024-04-04 12:00", "2024-04-04 13:00", Some("2")))
        .await
        .unwrap();
    assert_eq!(
        report,
        "Readings were found within the provided time span, but with no instant matches within the delta provided"
    );
}

#[tokio::test]
async fn peak_power_on_seeded_day() {
    let home = seeded_home().await;
    let report = home
        .services
        .logs
        .peak_power_consumption(&window("2024-01-01 12:00", "2024-01-01 13:00", Some("5")))
        .await
        .unwrap();
    assert!(report.ends_with("was of 350 Wh which happened at 2024-01-01T12:45:00"), "{}", report);
}

#[tokio::test]
async fn peak_power_falls_back_to_grid_only() {
    let home = seeded_home().await;
    add_logs(
        &home,
        "Grid Power Meter",
        "Energy Consumption Sensor",
        &[
            ("2024-05-01T08:00:00", "40"),
            ("2024-05-01T09:00:00", "90"),
            ("2024-05-01T10:00:00", "90"),
        ],
    )
    .await;
    let report = home
        .services
        .logs
        .peak_power_consumption(&window("2024-05-01 00:00", "2024-05-02 00:00", Some("5")))
        .await
        .unwrap();
    assert_eq!(
        report,
        "The Peak Power Consumption from the Grid within the selected Period was 90 Wh which happened at 2024-05-01T10:00:00 (No Power Source Device Logs were found within the selected period)"
    );
}

#[tokio::test]
async fn peak_power_without_grid_readings() {
    let home = seeded_home().await;
    let report = home
        .services
        .logs
        .peak_power_consumption(&window("2020-01-01 00:00", "2020-01-02 00:00", None))
        .await
        .unwrap();
    assert_eq!(
        report,
        "There are no records available from the Grid Power Meter for the given period"
    );
}

#[tokio::test]
async fn readings_listing_filters_by_window() {
    let home = seeded_home().await;
    let outdoor = device_named(&home.repos, OUTDOOR).await;
    let logs = &home.services.logs;

    let all = logs
        .find_readings(outdoor.id, &Default::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);

    let some = logs
        .find_readings(outdoor.id, &window("2024-01-01 12:05", "2024-01-01 12:10", None))
        .await
        .unwrap();
    let times: Vec<String> = some.iter().map(|l| l.time.to_string()).collect();
    assert_eq!(times, ["2024-01-01T12:05:00", "2024-01-01T12:10:00"]);

    let err = logs
        .find_readings(smarthome::models::DeviceId::new(), &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Device not found");
}

#[tokio::test]
async fn sun_reading_is_stored_for_the_first_matching_sensor() {
    let instant: DateTime<Utc> = "2024-06-21T05:12:00Z".parse().unwrap();
    let home = seeded_home_with_sun(Arc::new(FixedSun(instant))).await;

    let reading = home
        .services
        .logs
        .sun_reading("2024-06-21", "38.72", "-9.14", "sunrisesensor")
        .await
        .unwrap();
    assert_eq!(reading, "2024-06-21T05:12:00Z");

    let garden = device_named(&home.repos, OUTDOOR).await;
    let logs = home
        .services
        .logs
        .find_readings(garden.id, &Default::default())
        .await
        .unwrap();
    assert!(logs.iter().any(|l| l.value == ReadingValue::Instant(instant)
        && l.sensor_type_id.as_str() == "SunriseSensor"));
}

#[tokio::test]
async fn sun_reading_rejections() {
    let home = seeded_home_with_sun(Arc::new(NoSun)).await;
    let logs = &home.services.logs;

    let err = logs
        .sun_reading("2024-06-21", "38.72", "-9.14", "TemperatureSensor")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not find Sensor");

    let err = logs
        .sun_reading("2024-06-21", "95", "-9.14", "SunsetSensor")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid latitude value");

    let err = logs
        .sun_reading("2024-06-21", "80", "0", "SunsetSensor")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to compute sun time");
}

#[tokio::test]
async fn sun_reading_without_sun_sensors() {
    let memory = Arc::new(smarthome::repository::memory::MemoryRepo::default());
    let repos = smarthome::repository::Repositories::from_memory(memory);
    smarthome::bootstrap::seed_catalogue(&repos).await.unwrap();
    let services = smarthome::services::Services::new(
        &repos,
        smarthome::services::PowerMeter {
            device_id: smarthome::models::DeviceId::new(),
            sensor_type: smarthome::models::SensorTypeId::parse("EnergyConsumptionSensor").unwrap(),
        },
        Arc::new(NoSun),
    );
    let err = services
        .logs
        .sun_reading("2024-06-21", "38.72", "-9.14", "SunriseSensor")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No Sun Sensors (either Sunrise or Sunset) were found in the system"
    );
}

#[tokio::test]
async fn refused_sun_log_is_not_saved() {
    let instant: DateTime<Utc> = "2024-06-21T20:05:00Z".parse().unwrap();
    let home = seeded_home_with_sun(Arc::new(FixedSun(instant))).await;
    home.memory.set_reject_writes(true);
    let err = home
        .services
        .logs
        .sun_reading("2024-06-21", "38.72", "-9.14", "SunsetSensor")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotSaved("Unable to save reading")));
}
