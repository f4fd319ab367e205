// House handlers

use axum::{Json, extract::State};

use super::AppState;
use super::dto::{HouseView, LocationBody};
use crate::errors::ServiceResult;
use crate::models::{Address, Gps, Location};

/// GET /house — the house and its location (404 before the location is configured).
pub(super) async fn get_house(State(state): State<AppState>) -> ServiceResult<Json<HouseView>> {
    let house = state.services.house.get().await?;
    Ok(Json(house.into()))
}

/// PATCH /house — sets the address and GPS coordinates.
pub(super) async fn configure_location(
    State(state): State<AppState>,
    Json(body): Json<LocationBody>,
) -> ServiceResult<Json<HouseView>> {
    let location = Location {
        address: Address::new(
            &body.door,
            &body.street,
            &body.city,
            &body.country,
            &body.postal_code,
        )?,
        gps: Gps::new(body.latitude, body.longitude)?,
    };
    let house = state.services.house.configure_location(location).await?;
    Ok(Json(house.into()))
}
