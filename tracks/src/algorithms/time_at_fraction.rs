use anyhow::Result;

use crate::time::{interpolate_timestamps, Timestamp};
use crate::trajectory::Track;
use crate::trajectory_point::TrackPoint;

/// Maps a fraction of travel along a track to a timestamp.
pub trait TimeAtFraction {
    fn time_at_fraction<T: Track>(&self, path: &T, fraction: f64) -> Result<Timestamp>;
}

/// Treats the fraction as a share of the track's elapsed time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElapsedTimeAtFraction;

impl TimeAtFraction for ElapsedTimeAtFraction {
    fn time_at_fraction<T: Track>(&self, path: &T, fraction: f64) -> Result<Timestamp> {
        if fraction.is_nan() {
            bail!("Can't find the time at a NaN fraction");
        }
        let (first, last) = match (path.first(), path.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => bail!("Can't find the time at {} of an empty track", fraction),
        };
        if first.timestamp() > last.timestamp() {
            bail!(
                "Track ends at {}, before it starts at {}",
                last.timestamp(),
                first.timestamp()
            );
        }
        Ok(interpolate_timestamps(
            first.timestamp(),
            last.timestamp(),
            fraction,
        ))
    }
}

/// Treats the fraction as a share of the track's cumulative length, then finds when that
/// distance was reached. When several points sit at the same distance, the earliest one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceTimeAtFraction;

impl TimeAtFraction for DistanceTimeAtFraction {
    fn time_at_fraction<T: Track>(&self, path: &T, fraction: f64) -> Result<Timestamp> {
        if fraction.is_nan() {
            bail!("Can't find the time at a NaN fraction");
        }
        let pts = path.points();
        if pts.is_empty() {
            bail!("Can't find the time at {} of an empty track", fraction);
        }
        for pair in pts.windows(2) {
            if pair[0].current_length() < 0.0 {
                bail!("Track has points with no cumulative length set");
            }
            if pair[0].current_length() > pair[1].current_length() {
                bail!(
                    "Track lengths decrease from {} to {}",
                    pair[0].current_length(),
                    pair[1].current_length()
                );
            }
        }

        let first = &pts[0];
        let last = &pts[pts.len() - 1];
        let total = last.current_length();
        if total < 0.0 {
            bail!("Track has points with no cumulative length set");
        }
        if total == 0.0 || fraction <= 0.0 {
            return Ok(first.timestamp());
        }
        if fraction >= 1.0 {
            // The earliest point that already covers the whole length
            let idx = pts.partition_point(|pt| pt.current_length() < total);
            return Ok(pts[idx].timestamp());
        }

        let target = fraction * total;
        let idx = pts.partition_point(|pt| pt.current_length() < target);
        let hit = &pts[idx];
        if hit.current_length() == target || idx == 0 {
            return Ok(hit.timestamp());
        }
        let prev = &pts[idx - 1];
        let t = (target - prev.current_length()) / (hit.current_length() - prev.current_length());
        Ok(interpolate_timestamps(prev.timestamp(), hit.timestamp(), t))
    }
}
