// House location: postal address plus GPS coordinates

use super::{HouseId, non_blank};
use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Portugal,
    Usa,
    Spain,
    France,
}

impl Country {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            "Portugal" => Ok(Country::Portugal),
            "USA" => Ok(Country::Usa),
            "Spain" => Ok(Country::Spain),
            "France" => Ok(Country::France),
            _ => Err(ValidationError::rule("Please insert a valid country name.")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Portugal => "Portugal",
            Country::Usa => "USA",
            Country::Spain => "Spain",
            Country::France => "France",
        }
    }

    /// Prefix expected before the first `-` of a postal code.
    pub fn postal_prefix(&self) -> &'static str {
        match self {
            Country::Portugal => "PT",
            Country::Usa => "US",
            Country::Spain => "ES",
            Country::France => "FR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub door: String,
    pub street: String,
    pub city: String,
    pub country: Country,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        door: &str,
        street: &str,
        city: &str,
        country: &str,
        postal_code: &str,
    ) -> Result<Self, ValidationError> {
        let country = Country::parse(country)?;
        let postal_code = non_blank(postal_code, "Postal code")?;
        let prefix = postal_code.split_once('-').map(|(prefix, _)| prefix);
        if prefix != Some(country.postal_prefix()) {
            return Err(ValidationError::rule(format!(
                "Postal code {} does not match country {}",
                postal_code,
                country.as_str()
            )));
        }
        Ok(Self {
            door: non_blank(door, "Door")?,
            street: non_blank(street, "Street")?,
            city: non_blank(city, "City")?,
            country,
            postal_code,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gps {
    pub latitude: f64,
    pub longitude: f64,
}

impl Gps {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::rule("Invalid latitude value"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::rule("Invalid longitude value"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub address: Address,
    pub gps: Gps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: HouseId,
    pub location: Location,
}

impl House {
    pub fn new(location: Location) -> Self {
        Self {
            id: HouseId::new(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_code_prefix_must_match_country() {
        assert!(Address::new("1", "Main", "Porto", "Portugal", "PT-4000-123").is_ok());
        assert!(Address::new("1", "Main", "Porto", "Portugal", "ES-28001").is_err());
        assert!(Address::new("1", "Main", "Porto", "Portugal", "4000-123").is_err());
        assert!(Address::new("1", "Main", "Porto", "Germany", "DE-10115").is_err());
    }

    #[test]
    fn gps_bounds_are_inclusive() {
        assert!(Gps::new(90.0, -180.0).is_ok());
        assert!(Gps::new(90.1, 0.0).is_err());
        assert!(Gps::new(0.0, 180.5).is_err());
        assert!(Gps::new(f64::NAN, 0.0).is_err());
    }
}
