// Paired-reading aggregation: pure logic, no repository access.
// Each anchor reading is paired with the nearest reading of the other series; pairs further apart
// than the delta are dropped and the largest combined value wins.

use crate::models::{Delta, LogReading, ReadingValue, TimeStamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Pairing {
    /// One of the two series had no readings in the window.
    NoRecords,
    /// Both series had readings, but no anchor had a partner within the delta.
    NoMatches,
    Peak { value: ReadingValue, time: TimeStamp },
}

/// Nearest reading to `anchor` by absolute time gap; the earlier one wins on equal gaps.
fn nearest<'a>(anchor: &LogReading, others: &'a [LogReading]) -> Option<&'a LogReading> {
    let mut best: Option<&LogReading> = None;
    for other in others {
        let closer = match best {
            None => true,
            Some(b) => {
                let (gap, best_gap) = (anchor.time.gap(&other.time), anchor.time.gap(&b.time));
                gap < best_gap || (gap == best_gap && other.time < b.time)
            }
        };
        if closer {
            best = Some(other);
        }
    }
    best
}

/// Maximum of `combine(anchor, partner)` over all anchors that have a partner within `delta`.
/// Ties keep the first anchor in series order. The reported time is the anchor's.
pub fn max_paired<F>(
    anchors: &[LogReading],
    others: &[LogReading],
    delta: Delta,
    combine: F,
) -> Pairing
where
    F: Fn(&ReadingValue, &ReadingValue) -> Option<ReadingValue>,
{
    if anchors.is_empty() || others.is_empty() {
        return Pairing::NoRecords;
    }
    let tolerance = delta.as_duration();
    let mut best: Option<(f64, ReadingValue, TimeStamp)> = None;
    for anchor in anchors {
        let Some(partner) = nearest(anchor, others) else {
            continue;
        };
        if anchor.time.gap(&partner.time) > tolerance {
            continue;
        }
        let Some(value) = combine(&anchor.value, &partner.value) else {
            continue;
        };
        let Some(score) = value.as_f64() else {
            continue;
        };
        if best.as_ref().is_none_or(|(top, _, _)| score > *top) {
            best = Some((score, value, anchor.time));
        }
    }
    match best {
        Some((_, value, time)) => Pairing::Peak { value, time },
        None => Pairing::NoMatches,
    }
}

/// Temperature case: absolute difference between the two readings.
pub fn max_abs_difference(anchors: &[LogReading], others: &[LogReading], delta: Delta) -> Pairing {
    max_paired(anchors, others, delta, |a, b| a.abs_difference(b))
}

/// Power case: grid reading plus the magnitude of the (negative) source offset.
pub fn max_offset_sum(grid: &[LogReading], sources: &[LogReading], delta: Delta) -> Pairing {
    max_paired(grid, sources, delta, |g, s| g.plus_magnitude(s))
}

/// Highest numeric reading; on ties the latest one wins.
pub fn last_max(readings: &[LogReading]) -> Option<&LogReading> {
    let mut best: Option<(&LogReading, f64)> = None;
    for reading in readings {
        let Some(v) = reading.value.as_f64() else {
            continue;
        };
        if best.is_none_or(|(_, top)| v >= top) {
            best = Some((reading, v));
        }
    }
    best.map(|(reading, _)| reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceId, SensorId, SensorTypeId};

    fn reading(at: &str, value: ReadingValue) -> LogReading {
        LogReading::new(
            TimeStamp::parse_iso(at).unwrap(),
            value,
            SensorId::new(),
            DeviceId::new(),
            SensorTypeId::parse("TemperatureSensor").unwrap(),
        )
    }

    fn temps(points: &[(&str, f64)]) -> Vec<LogReading> {
        points
            .iter()
            .map(|(at, v)| reading(at, ReadingValue::Decimal(*v)))
            .collect()
    }

    fn peak_value(p: &Pairing) -> Option<f64> {
        match p {
            Pairing::Peak { value, .. } => value.as_f64(),
            _ => None,
        }
    }

    #[test]
    fn empty_series_is_no_records() {
        let some = temps(&[("2024-01-01T10:00:00", 20.0)]);
        assert_eq!(max_abs_difference(&[], &some, Delta::new(5)), Pairing::NoRecords);
        assert_eq!(max_abs_difference(&some, &[], Delta::new(5)), Pairing::NoRecords);
    }

    #[test]
    fn nothing_within_delta_is_no_matches() {
        let a = temps(&[("2024-01-01T10:00:00", 20.0)]);
        let b = temps(&[("2024-01-01T10:06:00", 25.0)]);
        assert_eq!(max_abs_difference(&a, &b, Delta::new(5)), Pairing::NoMatches);
    }

    #[test]
    fn zero_delta_pairs_only_exact_timestamps() {
        let a = temps(&[("2024-01-01T10:00:00", 20.0), ("2024-01-01T10:05:00", 10.0)]);
        let b = temps(&[("2024-01-01T10:00:01", 30.0), ("2024-01-01T10:05:00", 12.0)]);
        let result = max_abs_difference(&a, &b, Delta::new(0));
        assert_eq!(
            result,
            Pairing::Peak {
                value: ReadingValue::Decimal(2.0),
                time: TimeStamp::parse_iso("2024-01-01T10:05:00").unwrap(),
            }
        );
    }

    #[test]
    fn gap_equal_to_delta_is_accepted() {
        let a = temps(&[("2024-01-01T10:00:00", 20.0)]);
        let b = temps(&[("2024-01-01T10:05:00", 23.5)]);
        assert_eq!(peak_value(&max_abs_difference(&a, &b, Delta::new(5))), Some(3.5));
    }

    #[test]
    fn only_the_nearest_partner_is_considered() {
        // 10:04 is nearer than 10:00, even though 10:00 would give a larger difference.
        let a = temps(&[("2024-01-01T10:03:00", 20.0)]);
        let b = temps(&[("2024-01-01T10:00:00", 40.0), ("2024-01-01T10:04:00", 21.0)]);
        assert_eq!(peak_value(&max_abs_difference(&a, &b, Delta::new(5))), Some(1.0));
    }

    #[test]
    fn first_maximum_wins_ties() {
        let a = temps(&[("2024-01-01T10:00:00", 20.0), ("2024-01-01T11:00:00", 20.0)]);
        let b = temps(&[("2024-01-01T10:00:00", 25.0), ("2024-01-01T11:00:00", 15.0)]);
        match max_abs_difference(&a, &b, Delta::new(0)) {
            Pairing::Peak { time, .. } => assert_eq!(time.to_string(), "2024-01-01T10:00:00"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn widening_delta_never_lowers_the_peak() {
        let a = temps(&[
            ("2024-01-01T10:00:00", 20.0),
            ("2024-01-01T10:20:00", 10.0),
            ("2024-01-01T10:45:00", 30.0),
        ]);
        let b = temps(&[
            ("2024-01-01T10:01:00", 21.0),
            ("2024-01-01T10:27:00", 25.0),
            ("2024-01-01T11:00:00", 12.0),
        ]);
        let mut previous: Option<f64> = None;
        for minutes in 0..=30 {
            if let Some(v) = peak_value(&max_abs_difference(&a, &b, Delta::new(minutes))) {
                if let Some(p) = previous {
                    assert!(v >= p, "delta {} lowered peak {} -> {}", minutes, p, v);
                }
                previous = Some(v);
            }
        }
        assert_eq!(previous, Some(18.0));
    }

    #[test]
    fn power_adds_source_magnitude_and_keeps_integers() {
        let grid = vec![reading("2024-04-04T12:20:30", ReadingValue::Integer(23))];
        let source = vec![reading("2024-04-04T12:16:30", ReadingValue::Integer(-3))];
        assert_eq!(
            max_offset_sum(&grid, &source, Delta::new(10)),
            Pairing::Peak {
                value: ReadingValue::Integer(26),
                time: TimeStamp::parse_iso("2024-04-04T12:20:30").unwrap(),
            }
        );
    }

    #[test]
    fn last_max_prefers_the_latest_of_equal_peaks() {
        let grid = vec![
            reading("2024-01-01T12:00:00", ReadingValue::Integer(300)),
            reading("2024-01-01T12:10:00", ReadingValue::Integer(50)),
            reading("2024-01-01T12:45:00", ReadingValue::Integer(300)),
        ];
        let top = last_max(&grid).unwrap();
        assert_eq!(top.time.to_string(), "2024-01-01T12:45:00");
        assert!(last_max(&[]).is_none());
    }
}
