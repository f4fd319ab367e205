use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{House, Location};
use crate::repository::{HouseRepository, Repositories};

#[derive(Clone)]
pub struct HouseService {
    houses: Arc<dyn HouseRepository>,
}

impl HouseService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            houses: repos.houses.clone(),
        }
    }

    pub async fn get(&self) -> ServiceResult<House> {
        self.houses
            .find()
            .await?
            .ok_or(ServiceError::NotFound("House"))
    }

    /// Sets the location of the house, creating the house on first use.
    pub async fn configure_location(&self, location: Location) -> ServiceResult<House> {
        match self.houses.find().await? {
            Some(mut house) => {
                house.location = location;
                if !self.houses.update(&house).await? {
                    return Err(ServiceError::NotSaved("House"));
                }
                tracing::info!(house_id = %house.id, "House location updated");
                Ok(house)
            }
            None => {
                let house = House::new(location);
                if !self.houses.save(&house).await? {
                    return Err(ServiceError::NotSaved("House"));
                }
                tracing::info!(house_id = %house.id, "House created");
                Ok(house)
            }
        }
    }
}
