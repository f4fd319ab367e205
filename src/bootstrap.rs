// Startup seed: sensor/actuator catalogue, plus a demo house with devices, sensors and readings on an empty database

use crate::models::sensor::parse_reading;
use crate::models::{
    ACTUATOR_CATALOGUE, Actuator, ActuatorTypeId, Address, Device, DeviceId, ENERGY_CONSUMPTION_SENSOR,
    Gps, House, Location, LogReading, ROLLER_BLIND_ACTUATOR, RawSettings, Room, RoomDimensions,
    SENSOR_CATALOGUE, SUNRISE_SENSOR, SUNSET_SENSOR, Sensor, SensorType, SensorTypeId,
    TEMPERATURE_SENSOR, TimeStamp,
};
use crate::repository::Repositories;

/// Name of the seeded device whose energy readings feed the peak power report.
pub const GRID_METER_NAME: &str = "Grid Power Meter";

const OUTDOOR_TEMPERATURES: &[(&str, &str)] = &[
    ("2024-01-01T12:00:00", "20"),
    ("2024-01-01T12:05:00", "18"),
    ("2024-01-01T12:10:00", "25"),
    ("2024-01-01T12:45:00", "30"),
];
const INDOOR_TEMPERATURES: &[(&str, &str)] = &[
    ("2024-01-01T12:03:00", "18"),
    ("2024-01-01T12:06:00", "19"),
    ("2024-01-01T12:10:00", "20"),
    ("2024-01-01T12:15:00", "25"),
];
const GRID_ENERGY: &[(&str, &str)] = &[
    ("2024-01-01T12:00:00", "100"),
    ("2024-01-01T12:10:00", "50"),
    ("2024-01-01T12:15:00", "75"),
    ("2024-01-01T12:45:00", "300"),
];
const SOURCE_ENERGY: &[(&str, &str)] = &[
    ("2024-01-01T12:03:00", "-25"),
    ("2024-01-01T12:09:00", "-30"),
    ("2024-01-01T12:12:00", "-5"),
    ("2024-01-01T12:50:00", "-50"),
];

/// Inserts catalogue entries that are missing. Existing ones are left alone.
pub async fn seed_catalogue(repos: &Repositories) -> anyhow::Result<()> {
    let mut added = 0;
    for (id, unit, _) in SENSOR_CATALOGUE {
        let sensor_type = SensorType::new(SensorTypeId::parse(id)?, unit)?;
        if repos.sensor_types.save(&sensor_type).await? {
            added += 1;
        }
    }
    for id in ACTUATOR_CATALOGUE {
        if repos.actuator_types.save(&ActuatorTypeId::parse(id)?).await? {
            added += 1;
        }
    }
    tracing::info!("Catalogue seeded ({} new entries)", added);
    Ok(())
}

/// Seeds the demo house when no house exists yet. Returns the grid meter's id when it was created.
pub async fn seed_demo_house(repos: &Repositories) -> anyhow::Result<Option<DeviceId>> {
    if repos.houses.find().await?.is_some() {
        tracing::debug!("House already configured, skipping demo seed");
        return Ok(None);
    }

    let location = Location {
        address: Address::new(
            "default door",
            "default street",
            "default city",
            "Portugal",
            "PT-1234-567",
        )?,
        gps: Gps::new(0.0, 0.0)?,
    };
    let house = House::new(location);
    repos.houses.save(&house).await?;

    let circuit_room = Room::new(
        "Electrical Circuit Room",
        0,
        RoomDimensions::new(2.0, 2.0, 2.0)?,
        house.id,
    )?;
    let garden = Room::new("Garden", -1, RoomDimensions::new(40.0, 70.0, 0.0)?, house.id)?;
    let kitchen = Room::new("Kitchen", 1, RoomDimensions::new(7.0, 6.0, 2.0)?, house.id)?;
    for room in [&circuit_room, &garden, &kitchen] {
        repos.rooms.save(room).await?;
    }

    let garden_thermo = Device::new("Garden Temperature Controller", "WS-5050", garden.id)?;
    let kitchen_thermo = Device::new("Kitchen Temperature Controller", "WS-2000", kitchen.id)?;
    let light = Device::new("Kitchen Natural Light Controller", "RB-370", kitchen.id)?;
    let grid = Device::new(GRID_METER_NAME, "e-Redes", circuit_room.id)?;
    let source = Device::new("Power Source", "787B", circuit_room.id)?;
    for device in [&garden_thermo, &kitchen_thermo, &light, &grid, &source] {
        repos.devices.save(device).await?;
    }

    let temperature = SensorTypeId::parse(TEMPERATURE_SENSOR)?;
    let energy = SensorTypeId::parse(ENERGY_CONSUMPTION_SENSOR)?;
    let outdoor = Sensor::new("Outdoor Temperature Sensor", garden_thermo.id, temperature.clone())?;
    let indoor = Sensor::new("Indoor Temperature Sensor", kitchen_thermo.id, temperature)?;
    let grid_energy = Sensor::new("Energy Consumption Sensor", grid.id, energy.clone())?;
    let source_energy = Sensor::new("Energy Consumption Sensor", source.id, energy)?;
    let sunrise = Sensor::new(
        "Outdoor SunRise Sensor",
        garden_thermo.id,
        SensorTypeId::parse(SUNRISE_SENSOR)?,
    )?;
    let sunset = Sensor::new(
        "Outdoor SunSet Sensor",
        garden_thermo.id,
        SensorTypeId::parse(SUNSET_SENSOR)?,
    )?;
    for sensor in [&outdoor, &indoor, &grid_energy, &source_energy, &sunrise, &sunset] {
        repos.sensors.save(sensor).await?;
    }

    let roller = Actuator::new(
        "Kitchen Roller",
        ActuatorTypeId::parse(ROLLER_BLIND_ACTUATOR)?,
        light.id,
        &RawSettings::default(),
    )?;
    repos.actuators.save(&roller).await?;

    let mut logs = 0;
    for (sensor, series) in [
        (&outdoor, OUTDOOR_TEMPERATURES),
        (&indoor, INDOOR_TEMPERATURES),
        (&grid_energy, GRID_ENERGY),
        (&source_energy, SOURCE_ENERGY),
    ] {
        for (time, raw) in series {
            let log = LogReading::new(
                TimeStamp::parse_iso(time)?,
                parse_reading(&sensor.sensor_type_id, raw)?,
                sensor.id,
                sensor.device_id,
                sensor.sensor_type_id.clone(),
            );
            repos.logs.save(&log).await?;
            logs += 1;
        }
    }

    tracing::info!(
        house_id = %house.id,
        grid_meter = %grid.id,
        "Demo house seeded: 3 rooms, 5 devices, 6 sensors, 1 actuator, {} logs",
        logs
    );
    Ok(Some(grid.id))
}

/// Looks up the seeded grid meter by name, for restarts where the seed did not run.
pub async fn find_grid_meter(repos: &Repositories) -> anyhow::Result<Option<DeviceId>> {
    Ok(repos
        .devices
        .find_all()
        .await?
        .into_iter()
        .find(|d| d.name == GRID_METER_NAME)
        .map(|d| d.id))
}

/// Full seed. Returns the grid meter id when one exists afterwards.
pub async fn run(repos: &Repositories) -> anyhow::Result<Option<DeviceId>> {
    seed_catalogue(repos).await?;
    match seed_demo_house(repos).await? {
        Some(id) => Ok(Some(id)),
        None => find_grid_meter(repos).await,
    }
}
