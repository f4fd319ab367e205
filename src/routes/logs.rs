// Log handlers: listings (JSON) and reports (plain text)

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::dto::{LogView, OwnedTimeConfig, TimeConfigBody};
use super::{AppState, required};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::DeviceId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LogQuery {
    device_id: Option<String>,
    outdoor_id: Option<String>,
    indoor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SunQuery {
    date: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    sensor_type_id: Option<String>,
}

/// The time config travels as an optional JSON body, on GET requests too.
fn time_config(body: &Bytes) -> ServiceResult<OwnedTimeConfig> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TimeConfigBody::default().into());
    }
    serde_json::from_slice::<TimeConfigBody>(body)
        .map(OwnedTimeConfig::from)
        .map_err(|e| {
            tracing::debug!("Rejected time config body: {}", e);
            ServiceError::rule("Invalid time configuration")
        })
}

/// GET /logs?deviceId= — readings of a device, optionally within the body's window.
/// GET /logs?outdoorId=&indoorId= — maximum outdoor/indoor temperature difference.
pub(super) async fn logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
    body: Bytes,
) -> ServiceResult<Response> {
    let owned = time_config(&body)?;
    let config = owned.as_config();

    if query.device_id.is_some() {
        let device_id = DeviceId::parse(required(&query.device_id, "deviceId")?)?;
        let readings = state.services.logs.find_readings(device_id, &config).await?;
        let views: Vec<LogView> = readings.into_iter().map(LogView::from).collect();
        return Ok(Json(views).into_response());
    }

    let outdoor = DeviceId::parse(required(&query.outdoor_id, "outdoorId")?)?;
    let indoor = DeviceId::parse(required(&query.indoor_id, "indoorId")?)?;
    let report = state
        .services
        .logs
        .max_temperature_difference(outdoor, indoor, &config)
        .await?;
    Ok(report.into_response())
}

/// GET /logs/peak-power-consumption — peak house consumption within the body's window.
pub(super) async fn peak_power_consumption(
    State(state): State<AppState>,
    body: Bytes,
) -> ServiceResult<String> {
    let owned = time_config(&body)?;
    state
        .services
        .logs
        .peak_power_consumption(&owned.as_config())
        .await
}

/// POST /logs/get-sun-reading?date=&latitude=&longitude=&sensorTypeId= — stores and returns the sun event time.
pub(super) async fn sun_reading(
    State(state): State<AppState>,
    Query(query): Query<SunQuery>,
) -> ServiceResult<String> {
    state
        .services
        .logs
        .sun_reading(
            required(&query.date, "date")?,
            required(&query.latitude, "latitude")?,
            required(&query.longitude, "longitude")?,
            required(&query.sensor_type_id, "sensorTypeId")?,
        )
        .await
}
