// Identifiers: generated UUIDs for entities, catalogue names for sensor/actuator types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(HouseId, "house");
uuid_id!(RoomId, "room");
uuid_id!(DeviceId, "device");
uuid_id!(SensorId, "sensor");
uuid_id!(ActuatorId, "actuator");
uuid_id!(LogId, "log");

macro_rules! type_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::Blank($kind));
                }
                Ok(Self(s.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

type_id!(
    /// Catalogue name of a sensor type, e.g. `TemperatureSensor`.
    SensorTypeId,
    "Sensor type id"
);
type_id!(
    /// Catalogue name of an actuator type, e.g. `RollerBlindActuator`.
    ActuatorTypeId,
    "Actuator type id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_reject_garbage() {
        let err = DeviceId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.to_string(), "Invalid device id: not-a-uuid");
    }

    #[test]
    fn uuid_ids_display_roundtrip() {
        let id = RoomId::new();
        assert_eq!(RoomId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn type_ids_are_trimmed_and_non_blank() {
        assert_eq!(
            SensorTypeId::parse(" TemperatureSensor ").unwrap().as_str(),
            "TemperatureSensor"
        );
        assert!(ActuatorTypeId::parse("   ").is_err());
    }
}
