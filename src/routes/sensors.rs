// Sensor handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::dto::{SensorBody, SensorView};
use super::{AppState, required};
use crate::errors::ServiceResult;
use crate::models::{DeviceId, SensorId, SensorTypeId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeviceQuery {
    device_id: Option<String>,
}

/// POST /sensors — 201; the device must be active and the type known.
pub(super) async fn add_sensor(
    State(state): State<AppState>,
    Json(body): Json<SensorBody>,
) -> ServiceResult<(StatusCode, Json<SensorView>)> {
    let device_id = DeviceId::parse(&body.device_id)?;
    let sensor_type = SensorTypeId::parse(&body.sensor_type_id)?;
    let sensor = state
        .services
        .sensors
        .add(&body.name, device_id, sensor_type)
        .await?;
    Ok((StatusCode::CREATED, Json(sensor.into())))
}

/// GET /sensors/{id}
pub(super) async fn get_sensor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<SensorView>> {
    let sensor = state.services.sensors.get(SensorId::parse(&id)?).await?;
    Ok(Json(sensor.into()))
}

/// GET /sensors?deviceId=
pub(super) async fn sensors_of_device(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> ServiceResult<Json<Vec<SensorView>>> {
    let device_id = DeviceId::parse(required(&query.device_id, "deviceId")?)?;
    let sensors = state.services.sensors.by_device(device_id).await?;
    Ok(Json(sensors.into_iter().map(SensorView::from).collect()))
}
