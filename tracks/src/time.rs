use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};

/// Points carry a wall-clock time with no timezone attached.
pub type Timestamp = NaiveDateTime;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Linear interpolation between two timestamps, to the microsecond. `t` is clamped to [0, 1].
pub fn interpolate_timestamps(a: Timestamp, b: Timestamp, t: f64) -> Timestamp {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    a + Duration::microseconds((t * micros(b - a)).round() as i64)
}

/// How far `x` is between `a` and `b`, as a fraction. Not clamped.
pub fn fraction_between(a: Timestamp, b: Timestamp, x: Timestamp) -> f64 {
    let span = micros(b - a);
    if span == 0.0 {
        return 0.0;
    }
    micros(x - a) / span
}

// Only spans of several hundred thousand years overflow microseconds
pub(crate) fn micros(d: Duration) -> f64 {
    match d.num_microseconds() {
        Some(us) => us as f64,
        None => d.num_milliseconds() as f64 * 1000.0,
    }
}

pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    NaiveDateTime::parse_from_str(raw.trim(), FORMAT)
        .with_context(|| format!("bad timestamp {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation() {
        let a = parse_timestamp("2020-01-01 10:00:00").unwrap();
        let b = parse_timestamp("2020-01-01 10:00:10").unwrap();
        assert_eq!(
            interpolate_timestamps(a, b, 0.25),
            parse_timestamp("2020-01-01 10:00:02.500").unwrap()
        );
        assert_eq!(interpolate_timestamps(a, b, -3.0), a);
        assert_eq!(interpolate_timestamps(a, b, 7.0), b);

        let mid = interpolate_timestamps(a, b, 0.5);
        assert_eq!(fraction_between(a, b, mid), 0.5);
        assert_eq!(fraction_between(a, a, mid), 0.0);
    }

    #[test]
    fn parsing() {
        assert!(parse_timestamp("2020-01-01 10:00:00").is_ok());
        assert!(parse_timestamp(" 2020-01-01 10:00:00.125 ").is_ok());
        assert!(parse_timestamp("10:00").is_err());
    }
}
