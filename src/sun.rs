// Sunrise/sunset times for a date and GPS position

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::Gps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

/// Source of sun event times; swapped for a fixed clock in tests.
pub trait SunCalculator: Send + Sync {
    /// `None` when the event does not happen that day (polar day or night).
    fn compute(&self, event: SunEvent, date: NaiveDate, gps: Gps) -> Option<DateTime<Utc>>;
}

/// Official zenith: 90°50' (refraction plus solar disc radius).
const ZENITH_DEG: f64 = 90.833;

/// NOAA / Almanac for Computers sunrise equation. Accurate to about a minute below the polar circles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaSunCalculator;

impl SunCalculator for NoaaSunCalculator {
    fn compute(&self, event: SunEvent, date: NaiveDate, gps: Gps) -> Option<DateTime<Utc>> {
        let local_hour = match event {
            SunEvent::Sunrise => 6.0,
            SunEvent::Sunset => 18.0,
        };
        let lng_hour = gps.longitude / 15.0;
        let t = f64::from(date.ordinal()) + (local_hour - lng_hour) / 24.0;

        // Sun's mean anomaly and true longitude
        let m = 0.9856 * t - 3.289;
        let l = (m + 1.916 * sin_deg(m) + 0.020 * sin_deg(2.0 * m) + 282.634).rem_euclid(360.0);

        // Right ascension, moved into the same quadrant as L
        let mut ra = atan_deg(0.91764 * tan_deg(l)).rem_euclid(360.0);
        ra += (l / 90.0).floor() * 90.0 - (ra / 90.0).floor() * 90.0;
        let ra_hours = ra / 15.0;

        let sin_dec = 0.39782 * sin_deg(l);
        let cos_dec = sin_dec.asin().cos();
        let cos_h = (cos_deg(ZENITH_DEG) - sin_dec * sin_deg(gps.latitude))
            / (cos_dec * cos_deg(gps.latitude));
        if !(-1.0..=1.0).contains(&cos_h) {
            return None;
        }

        let h = match event {
            SunEvent::Sunrise => 360.0 - cos_h.acos().to_degrees(),
            SunEvent::Sunset => cos_h.acos().to_degrees(),
        } / 15.0;
        let local_mean_time = h + ra_hours - 0.06571 * t - 6.622;
        let mut ut = (local_mean_time - lng_hour).rem_euclid(24.0);

        // Keep the event on the requested local day, which may be the previous or next UTC day.
        let expected = local_hour - lng_hour;
        if ut - expected > 12.0 {
            ut -= 24.0;
        } else if ut - expected < -12.0 {
            ut += 24.0;
        }

        let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
        let seconds = (ut * 3600.0).round() as i64;
        Some(midnight + Duration::seconds(seconds))
    }
}

fn sin_deg(d: f64) -> f64 {
    d.to_radians().sin()
}

fn cos_deg(d: f64) -> f64 {
    d.to_radians().cos()
}

fn tan_deg(d: f64) -> f64 {
    d.to_radians().tan()
}

fn atan_deg(x: f64) -> f64 {
    x.atan().to_degrees()
}
