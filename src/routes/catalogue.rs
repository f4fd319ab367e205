// Catalogue handlers

use axum::{Json, extract::State};

use super::AppState;
use super::dto::ActuatorTypeView;
use crate::errors::ServiceResult;
use crate::models::SensorType;

/// GET /sensortypes
pub(super) async fn sensor_types(State(state): State<AppState>) -> ServiceResult<Json<Vec<SensorType>>> {
    Ok(Json(state.services.catalogue.sensor_types().await?))
}

/// GET /actuatortypes
pub(super) async fn actuator_types(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<ActuatorTypeView>>> {
    let types = state.services.catalogue.actuator_types().await?;
    Ok(Json(
        types.into_iter().map(|id| ActuatorTypeView { id }).collect(),
    ))
}
