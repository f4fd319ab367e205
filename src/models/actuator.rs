// Actuators: typed behaviour (roller blind, switch, bounded integer/decimal) plus settings and status

use super::{ActuatorId, ActuatorTypeId, DeviceId, non_blank};
use crate::errors::ValidationError;

pub const ROLLER_BLIND_ACTUATOR: &str = "RollerBlindActuator";
pub const SWITCH_ACTUATOR: &str = "SwitchActuator";
pub const INTEGER_VALUE_ACTUATOR: &str = "IntegerValueActuator";
pub const DECIMAL_VALUE_ACTUATOR: &str = "DecimalValueActuator";

pub const ACTUATOR_CATALOGUE: &[&str] = &[
    ROLLER_BLIND_ACTUATOR,
    SWITCH_ACTUATOR,
    INTEGER_VALUE_ACTUATOR,
    DECIMAL_VALUE_ACTUATOR,
];

const INVALID_SETTINGS: &str = "Invalid actuator settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorKind {
    RollerBlind,
    Switch,
    IntegerValue,
    DecimalValue,
}

impl ActuatorKind {
    pub fn of(type_id: &ActuatorTypeId) -> Option<Self> {
        match type_id.as_str() {
            ROLLER_BLIND_ACTUATOR => Some(ActuatorKind::RollerBlind),
            SWITCH_ACTUATOR => Some(ActuatorKind::Switch),
            INTEGER_VALUE_ACTUATOR => Some(ActuatorKind::IntegerValue),
            DECIMAL_VALUE_ACTUATOR => Some(ActuatorKind::DecimalValue),
            _ => None,
        }
    }

    fn initial_status(&self) -> &'static str {
        match self {
            ActuatorKind::RollerBlind => "Default - 100",
            ActuatorKind::Switch => "Default: 1",
            ActuatorKind::IntegerValue | ActuatorKind::DecimalValue => "Initial reading",
        }
    }
}

/// Settings exactly as received, before the actuator type decides how to read them.
#[derive(Debug, Clone, Default)]
pub struct RawSettings<'a> {
    pub lower_limit: Option<&'a str>,
    pub upper_limit: Option<&'a str>,
    pub precision: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Settings {
    None,
    Integer { lower: i64, upper: i64 },
    Decimal { lower: f64, upper: f64, precision: f64 },
}

impl Settings {
    pub fn integer(lower: &str, upper: &str) -> Result<Self, ValidationError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::rule(INVALID_SETTINGS))
        };
        let (lower, upper) = (parse(lower)?, parse(upper)?);
        if lower >= upper {
            return Err(ValidationError::rule(
                "Upper limit can't be less than or equal to lower limit.",
            ));
        }
        Ok(Settings::Integer { lower, upper })
    }

    /// Limits must share their number of decimal places, and not exceed the precision's.
    pub fn decimal(lower: &str, upper: &str, precision: &str) -> Result<Self, ValidationError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::rule(INVALID_SETTINGS))
        };
        let (lower, upper, precision) = (parse(lower)?, parse(upper)?, parse(precision)?);
        let valid = lower < upper
            && precision > 0.0
            && precision < 1.0
            && decimal_places(lower) == decimal_places(upper)
            && decimal_places(lower) <= decimal_places(precision);
        if !valid {
            return Err(ValidationError::rule(INVALID_SETTINGS));
        }
        Ok(Settings::Decimal {
            lower,
            upper,
            precision,
        })
    }

    pub fn limits(&self) -> Option<(String, String, Option<String>)> {
        match *self {
            Settings::None => None,
            Settings::Integer { lower, upper } => Some((lower.to_string(), upper.to_string(), None)),
            Settings::Decimal {
                lower,
                upper,
                precision,
            } => Some((
                format!("{:?}", lower),
                format!("{:?}", upper),
                Some(format!("{:?}", precision)),
            )),
        }
    }
}

/// Digits after the point in the shortest round-trip form; whole numbers count as one (`2.0`).
fn decimal_places(value: f64) -> usize {
    let text = format!("{:?}", value.abs());
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn round_to(value: f64, places: usize) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub id: ActuatorId,
    pub name: String,
    pub actuator_type_id: ActuatorTypeId,
    pub device_id: DeviceId,
    pub settings: Settings,
    pub status: String,
}

impl Actuator {
    pub fn new(
        name: &str,
        actuator_type_id: ActuatorTypeId,
        device_id: DeviceId,
        raw: &RawSettings<'_>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name, "Actuator name")?;
        let kind = ActuatorKind::of(&actuator_type_id)
            .ok_or_else(|| ValidationError::rule("Actuator type is not supported"))?;
        let settings = match kind {
            ActuatorKind::RollerBlind | ActuatorKind::Switch => Settings::None,
            ActuatorKind::IntegerValue => match (raw.lower_limit, raw.upper_limit) {
                (Some(lower), Some(upper)) => Settings::integer(lower, upper)?,
                _ => return Err(ValidationError::rule(INVALID_SETTINGS)),
            },
            ActuatorKind::DecimalValue => match (raw.lower_limit, raw.upper_limit, raw.precision) {
                (Some(lower), Some(upper), Some(precision)) => {
                    Settings::decimal(lower, upper, precision)?
                }
                _ => return Err(ValidationError::rule(INVALID_SETTINGS)),
            },
        };
        Ok(Self {
            id: ActuatorId::new(),
            name,
            status: kind.initial_status().to_string(),
            actuator_type_id,
            device_id,
            settings,
        })
    }

    pub fn kind(&self) -> Option<ActuatorKind> {
        ActuatorKind::of(&self.actuator_type_id)
    }

    /// Validates the command for this actuator's type and records it as the new status.
    pub fn execute(&mut self, command: &str) -> Result<&str, ValidationError> {
        let command = command.trim();
        let unparseable = || ValidationError::rule("Unparseable value, could not execute command");
        let rejected = || ValidationError::rule("Invalid value, could not execute command");
        let status = match (self.kind(), self.settings) {
            (Some(ActuatorKind::RollerBlind), _) => {
                let v: i64 = command.parse().map_err(|_| unparseable())?;
                if !(0..=100).contains(&v) {
                    return Err(rejected());
                }
                v.to_string()
            }
            (Some(ActuatorKind::Switch), _) => {
                let v: i64 = command.parse().map_err(|_| unparseable())?;
                if v != 0 && v != 1 {
                    return Err(rejected());
                }
                v.to_string()
            }
            (Some(ActuatorKind::IntegerValue), Settings::Integer { lower, upper }) => {
                let v: i64 = command.parse().map_err(|_| unparseable())?;
                if v < lower || v > upper {
                    return Err(rejected());
                }
                v.to_string()
            }
            (
                Some(ActuatorKind::DecimalValue),
                Settings::Decimal {
                    lower,
                    upper,
                    precision,
                },
            ) => {
                let v: f64 = command
                    .parse()
                    .ok()
                    .filter(|v: &f64| v.is_finite())
                    .ok_or_else(unparseable)?;
                if v < lower || v > upper {
                    return Err(ValidationError::rule(
                        "Value out of actuator limits, could not execute command",
                    ));
                }
                let places = decimal_places(precision);
                let v = if decimal_places(v) > places {
                    round_to(v, places)
                } else {
                    v
                };
                format!("{:?}", v)
            }
            _ => return Err(ValidationError::rule("Actuator cannot execute commands")),
        };
        self.status = status;
        Ok(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actuator(type_id: &str, raw: RawSettings<'_>) -> Result<Actuator, ValidationError> {
        Actuator::new(
            "Kitchen Roller",
            ActuatorTypeId::parse(type_id).unwrap(),
            DeviceId::new(),
            &raw,
        )
    }

    #[test]
    fn integer_settings_require_lower_below_upper() {
        let err = Settings::integer("10", "10").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Upper limit can't be less than or equal to lower limit."
        );
        assert_eq!(
            Settings::integer("a", "10").unwrap_err().to_string(),
            "Invalid actuator settings"
        );
    }

    #[test]
    fn decimal_settings_check_precision_and_places() {
        assert!(Settings::decimal("1.5", "20.5", "0.1").is_ok());
        assert!(Settings::decimal("1.55", "20.5", "0.01").is_err());
        assert!(Settings::decimal("1.55", "20.55", "0.1").is_err());
        assert!(Settings::decimal("1.5", "20.5", "1").is_err());
        assert!(Settings::decimal("20.5", "1.5", "0.1").is_err());
    }

    #[test]
    fn roller_blind_starts_at_default_and_accepts_percentages() {
        let mut roller = actuator(ROLLER_BLIND_ACTUATOR, RawSettings::default()).unwrap();
        assert_eq!(roller.status, "Default - 100");
        assert_eq!(roller.execute("0").unwrap(), "0");
        assert!(roller.execute("101").is_err());
        assert!(roller.execute("half").is_err());
        assert_eq!(roller.status, "0");
    }

    #[test]
    fn switch_accepts_only_zero_or_one() {
        let mut switch = actuator(SWITCH_ACTUATOR, RawSettings::default()).unwrap();
        assert_eq!(switch.status, "Default: 1");
        assert!(switch.execute("2").is_err());
        assert_eq!(switch.execute("0").unwrap(), "0");
    }

    #[test]
    fn integer_actuator_needs_settings_and_bounds_commands() {
        assert!(actuator(INTEGER_VALUE_ACTUATOR, RawSettings::default()).is_err());
        let mut dimmer = actuator(
            INTEGER_VALUE_ACTUATOR,
            RawSettings {
                lower_limit: Some("0"),
                upper_limit: Some("10"),
                precision: None,
            },
        )
        .unwrap();
        assert_eq!(dimmer.execute("10").unwrap(), "10");
        assert!(dimmer.execute("11").is_err());
    }

    #[test]
    fn decimal_actuator_rounds_to_precision() {
        let mut thermostat = actuator(
            DECIMAL_VALUE_ACTUATOR,
            RawSettings {
                lower_limit: Some("15.0"),
                upper_limit: Some("30.0"),
                precision: Some("0.5"),
            },
        )
        .unwrap();
        assert_eq!(thermostat.execute("21.26").unwrap(), "21.3");
        assert!(thermostat.execute("30.5").is_err());
    }
}
