// HTTP routes

mod actuators;
mod catalogue;
mod devices;
pub mod dto;
mod house;
mod http;
mod logs;
mod rooms;
mod sensors;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::ValidationError;
use crate::services::Services;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) services: Services,
}

pub fn app(services: Services) -> Router {
    let state = AppState { services };
    Router::new()
        .route("/", get(|| async { "Hello from the smart home server!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(
            "/house",
            get(house::get_house).patch(house::configure_location),
        ) // GET, PATCH /house
        .route("/rooms", get(rooms::list_rooms).post(rooms::add_room)) // GET, POST /rooms
        .route("/rooms/{id}", get(rooms::get_room)) // GET /rooms/{id}
        .route(
            "/devices",
            get(devices::devices_in_room).post(devices::add_device),
        ) // GET /devices?roomID=, POST /devices
        .route(
            "/devices/byfunctionality",
            get(devices::devices_by_functionality),
        ) // GET /devices/byfunctionality
        .route(
            "/devices/{id}",
            get(devices::get_device).patch(devices::deactivate_device),
        ) // GET, PATCH /devices/{id}
        .route("/sensortypes", get(catalogue::sensor_types)) // GET /sensortypes
        .route("/actuatortypes", get(catalogue::actuator_types)) // GET /actuatortypes
        .route(
            "/sensors",
            get(sensors::sensors_of_device).post(sensors::add_sensor),
        ) // GET /sensors?deviceId=, POST /sensors
        .route("/sensors/{id}", get(sensors::get_sensor)) // GET /sensors/{id}
        .route(
            "/actuators",
            get(actuators::actuators_of_device).post(actuators::add_actuator),
        ) // GET /actuators?deviceId=, POST /actuators
        .route("/actuators/{id}", get(actuators::get_actuator)) // GET /actuators/{id}
        .route(
            "/actuators/{id}/closerollerblind",
            post(actuators::close_roller_blind),
        ) // POST /actuators/{id}/closerollerblind
        .route("/actuators/{id}/act", patch(actuators::execute_command)) // PATCH /actuators/{id}/act?command=
        .route("/logs", get(logs::logs)) // GET /logs?deviceId= | ?outdoorId=&indoorId=
        .route(
            "/logs/peak-power-consumption",
            get(logs::peak_power_consumption),
        ) // GET /logs/peak-power-consumption
        .route("/logs/get-sun-reading", post(logs::sun_reading)) // POST /logs/get-sun-reading
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Query parameter that must be present and non-blank.
fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Blank(name)),
    }
}
