// Timestamps, time windows and pairing tolerance for log queries.
// Times are local wall-clock (no zone), truncated to whole seconds.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::ValidationError;

/// ISO-8601 local date-time, always with seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp(NaiveDateTime);

impl TimeStamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value.trunc_subsecs(0))
    }

    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }

    /// Builds a timestamp from separate date (`YYYY-MM-DD`) and time (`HH:MM[:SS[.fff]]`) fields.
    pub fn from_parts(date: Option<&str>, time: Option<&str>) -> Result<Self, ValidationError> {
        let (Some(date), Some(time)) = (date, time) else {
            return Err(ValidationError::InvalidDateTime);
        };
        let (date, time) = (date.trim(), time.trim());
        if date.is_empty() || time.is_empty() {
            return Err(ValidationError::InvalidDateTime);
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDateTime)?;
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|_| ValidationError::InvalidDateTime)?;
        Ok(Self::new(date.and_time(time)))
    }

    /// Parses the `YYYY-MM-DDTHH:MM:SS` form produced by `Display`.
    pub fn parse_iso(s: &str) -> Result<Self, ValidationError> {
        NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M"))
            .map(Self::new)
            .map_err(|_| ValidationError::InvalidDateTime)
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }

    /// Absolute distance between two timestamps.
    pub fn gap(&self, other: &TimeStamp) -> Duration {
        (self.0 - other.0).abs()
    }
}

impl From<NaiveDateTime> for TimeStamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for TimeStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Closed interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: TimeStamp,
    end: TimeStamp,
}

impl TimeWindow {
    pub fn new(start: TimeStamp, end: TimeStamp) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidTimeStamps);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeStamp {
        self.start
    }

    pub fn end(&self) -> TimeStamp {
        self.end
    }

    pub fn contains(&self, ts: &TimeStamp) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}

/// Maximum timestamp gap, in minutes, for two readings to count as the same instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Delta(u32);

impl Delta {
    /// Tolerance used when a request leaves the delta blank or at zero.
    pub const DEFAULT_MINUTES: u32 = 5;

    /// `Delta::new(0)` pairs exact timestamps only.
    pub fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Request form: absent, blank or `0` falls back to the default tolerance.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let minutes = match raw.map(str::trim) {
            None | Some("") => 0,
            Some(s) => s.parse::<u32>().map_err(|_| ValidationError::InvalidDelta)?,
        };
        Ok(Self(if minutes == 0 {
            Self::DEFAULT_MINUTES
        } else {
            minutes
        }))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

/// Raw time configuration as received from a request, before validation.
#[derive(Debug, Clone, Default)]
pub struct TimeConfig<'a> {
    pub initial_date: Option<&'a str>,
    pub initial_time: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub delta: Option<&'a str>,
}

impl TimeConfig<'_> {
    /// Window and delta for the aggregation queries. All four date/time fields are required.
    pub fn window_and_delta(&self) -> Result<(TimeWindow, Delta), ValidationError> {
        let window = self.window()?;
        let delta = Delta::parse(self.delta)?;
        Ok((window, delta))
    }

    /// Both ends required; the end may not lie in the future.
    pub fn window(&self) -> Result<TimeWindow, ValidationError> {
        let start = TimeStamp::from_parts(self.initial_date, self.initial_time)?;
        let end = TimeStamp::from_parts(self.end_date, self.end_time)?;
        if end > TimeStamp::now() {
            return Err(ValidationError::InvalidTimeStamps);
        }
        TimeWindow::new(start, end)
    }

    /// Window for plain listings: none when every field is absent, otherwise both ends must be complete.
    pub fn optional_window(&self) -> Result<Option<TimeWindow>, ValidationError> {
        let fields = [
            self.initial_date,
            self.initial_time,
            self.end_date,
            self.end_time,
        ];
        if fields.iter().all(Option::is_none) {
            return Ok(None);
        }
        self.window().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config<'a>(d1: &'a str, t1: &'a str, d2: &'a str, t2: &'a str) -> TimeConfig<'a> {
        TimeConfig {
            initial_date: Some(d1),
            initial_time: Some(t1),
            end_date: Some(d2),
            end_time: Some(t2),
            delta: None,
        }
    }

    #[test]
    fn timestamp_accepts_minutes_only_and_truncates_fraction() {
        let ts = TimeStamp::from_parts(Some("2024-03-26"), Some("00:02")).unwrap();
        assert_eq!(ts.to_string(), "2024-03-26T00:02:00");
        let ts = TimeStamp::from_parts(Some("2024-03-26"), Some("00:02:01.987")).unwrap();
        assert_eq!(ts.to_string(), "2024-03-26T00:02:01");
    }

    #[test]
    fn timestamp_rejects_missing_blank_or_garbage() {
        for (d, t) in [
            (None, Some("10:00")),
            (Some("2024-01-01"), None),
            (Some("  "), Some("10:00")),
            (Some("2024-13-01"), Some("10:00")),
            (Some("2024-01-01"), Some("25:00")),
        ] {
            assert_eq!(
                TimeStamp::from_parts(d, t),
                Err(ValidationError::InvalidDateTime)
            );
        }
    }

    #[test]
    fn window_rejects_start_after_end() {
        let err = config("2024-01-02", "00:00", "2024-01-01", "00:00")
            .window()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidTimeStamps);
    }

    #[test]
    fn window_allows_start_equal_to_end() {
        let w = config("2024-01-01", "10:00", "2024-01-01", "10:00")
            .window()
            .unwrap();
        assert!(w.contains(&w.start()));
    }

    #[test]
    fn window_rejects_end_in_the_future() {
        let err = config("2024-01-01", "00:00", "2999-01-01", "00:00")
            .window()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidTimeStamps);
    }

    #[test]
    fn delta_blank_or_zero_uses_default_and_rejects_negative() {
        assert_eq!(Delta::parse(None).unwrap().minutes(), 5);
        assert_eq!(Delta::parse(Some(" ")).unwrap().minutes(), 5);
        assert_eq!(Delta::parse(Some("0")).unwrap().minutes(), 5);
        assert_eq!(Delta::parse(Some("15")).unwrap().minutes(), 15);
        assert_eq!(Delta::parse(Some("-1")), Err(ValidationError::InvalidDelta));
        assert_eq!(Delta::parse(Some("abc")), Err(ValidationError::InvalidDelta));
    }

    #[test]
    fn optional_window_requires_all_or_nothing() {
        assert!(TimeConfig::default().optional_window().unwrap().is_none());
        let half = TimeConfig {
            initial_date: Some("2024-01-01"),
            initial_time: Some("10:00"),
            ..Default::default()
        };
        assert_eq!(
            half.optional_window(),
            Err(ValidationError::InvalidDateTime)
        );
    }
}
