// Room handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::AppState;
use super::dto::{RoomBody, RoomView};
use crate::errors::ServiceResult;
use crate::models::{RoomDimensions, RoomId};

/// POST /rooms — 201 with the new room.
pub(super) async fn add_room(
    State(state): State<AppState>,
    Json(body): Json<RoomBody>,
) -> ServiceResult<(StatusCode, Json<RoomView>)> {
    let dimensions = RoomDimensions::new(body.length, body.width, body.height)?;
    let room = state
        .services
        .rooms
        .add(&body.name, body.floor, dimensions)
        .await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

/// GET /rooms
pub(super) async fn list_rooms(State(state): State<AppState>) -> ServiceResult<Json<Vec<RoomView>>> {
    let rooms = state.services.rooms.list().await?;
    Ok(Json(rooms.into_iter().map(RoomView::from).collect()))
}

/// GET /rooms/{id}
pub(super) async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<RoomView>> {
    let room = state.services.rooms.get(RoomId::parse(&id)?).await?;
    Ok(Json(room.into()))
}
