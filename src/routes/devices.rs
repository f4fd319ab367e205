// Device handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::dto::{DeviceBody, DeviceView};
use super::{AppState, required};
use crate::errors::ServiceResult;
use crate::models::{DeviceId, RoomId};

#[derive(Debug, Deserialize)]
pub(super) struct RoomQuery {
    #[serde(rename = "roomID", alias = "roomId")]
    room_id: Option<String>,
}

/// POST /devices — adds a device to an existing room; 201.
pub(super) async fn add_device(
    State(state): State<AppState>,
    Json(body): Json<DeviceBody>,
) -> ServiceResult<(StatusCode, Json<DeviceView>)> {
    let room_id = RoomId::parse(&body.room_id)?;
    let device = state
        .services
        .devices
        .add(&body.name, &body.model, room_id)
        .await?;
    Ok((StatusCode::CREATED, Json(device.into())))
}

/// GET /devices?roomID=
pub(super) async fn devices_in_room(
    State(state): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> ServiceResult<Json<Vec<DeviceView>>> {
    let room_id = RoomId::parse(required(&query.room_id, "roomID")?)?;
    let devices = state.services.devices.by_room(room_id).await?;
    Ok(Json(devices.into_iter().map(DeviceView::from).collect()))
}

/// GET /devices/{id}
pub(super) async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<DeviceView>> {
    let device = state.services.devices.get(DeviceId::parse(&id)?).await?;
    Ok(Json(device.into()))
}

/// PATCH /devices/{id} — deactivates the device.
pub(super) async fn deactivate_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<DeviceView>> {
    let device = state
        .services
        .devices
        .deactivate(DeviceId::parse(&id)?)
        .await?;
    Ok(Json(device.into()))
}

/// GET /devices/byfunctionality — sensor/actuator type id to the devices carrying it.
pub(super) async fn devices_by_functionality(
    State(state): State<AppState>,
) -> ServiceResult<Json<BTreeMap<String, Vec<DeviceView>>>> {
    let grouped = state.services.devices.by_functionality().await?;
    Ok(Json(
        grouped
            .into_iter()
            .map(|(functionality, devices)| {
                (
                    functionality,
                    devices.into_iter().map(DeviceView::from).collect(),
                )
            })
            .collect(),
    ))
}
