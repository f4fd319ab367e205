// Actuator handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::dto::{ActuatorBody, ActuatorView, Scalar};
use super::{AppState, required};
use crate::errors::ServiceResult;
use crate::models::{ActuatorId, ActuatorTypeId, DeviceId, RawSettings};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeviceQuery {
    device_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommandQuery {
    command: Option<String>,
}

/// POST /actuators — 201; limits are required for integer and decimal value actuators.
pub(super) async fn add_actuator(
    State(state): State<AppState>,
    Json(body): Json<ActuatorBody>,
) -> ServiceResult<(StatusCode, Json<ActuatorView>)> {
    let device_id = DeviceId::parse(&body.device_id)?;
    let type_id = ActuatorTypeId::parse(&body.actuator_type_id)?;
    let lower = body.lower_limit.map(Scalar::into_text);
    let upper = body.upper_limit.map(Scalar::into_text);
    let precision = body.precision.map(Scalar::into_text);
    let settings = RawSettings {
        lower_limit: lower.as_deref(),
        upper_limit: upper.as_deref(),
        precision: precision.as_deref(),
    };
    let actuator = state
        .services
        .actuators
        .add(&body.name, type_id, device_id, &settings)
        .await?;
    Ok((StatusCode::CREATED, Json(actuator.into())))
}

/// GET /actuators/{id}
pub(super) async fn get_actuator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<ActuatorView>> {
    let actuator = state.services.actuators.get(ActuatorId::parse(&id)?).await?;
    Ok(Json(actuator.into()))
}

/// GET /actuators?deviceId=
pub(super) async fn actuators_of_device(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> ServiceResult<Json<Vec<ActuatorView>>> {
    let device_id = DeviceId::parse(required(&query.device_id, "deviceId")?)?;
    let actuators = state.services.actuators.by_device(device_id).await?;
    Ok(Json(actuators.into_iter().map(ActuatorView::from).collect()))
}

/// POST /actuators/{id}/closerollerblind — 200 with no body; 422 when the actuator is not a roller blind.
pub(super) async fn close_roller_blind(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    state
        .services
        .actuators
        .close_roller_blind(ActuatorId::parse(&id)?)
        .await?;
    Ok(StatusCode::OK)
}

/// PATCH /actuators/{id}/act?command= — returns the actuator with its new status.
pub(super) async fn execute_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CommandQuery>,
) -> ServiceResult<Json<ActuatorView>> {
    let id = ActuatorId::parse(&id)?;
    let command = required(&query.command, "command")?;
    let actuator = state.services.actuators.execute(id, command).await?;
    Ok(Json(actuator.into()))
}
