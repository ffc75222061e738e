use anyhow::Result;

use super::point_at_time::{InterpolatedPointAtTime, PointAtTime};
use super::time_at_fraction::{ElapsedTimeAtFraction, TimeAtFraction};
use crate::trajectory::Track;
use crate::trajectory_point::TrackPoint;

/// Finds the point some fraction of the way along a track.
///
/// This never interpolates by itself. Anything strictly inside the track is turned into a
/// timestamp first, then resolved as a point at that time, so asking by fraction always agrees
/// with asking by time.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointAtFraction<F = ElapsedTimeAtFraction, P = InterpolatedPointAtTime> {
    time_at_fraction: F,
    point_at_time: P,
}

impl<F: TimeAtFraction, P: PointAtTime> PointAtFraction<F, P> {
    pub fn new(time_at_fraction: F, point_at_time: P) -> Self {
        Self {
            time_at_fraction,
            point_at_time,
        }
    }

    /// The rules apply in order:
    ///
    /// 1. An empty track yields the zero point.
    /// 2. A track with one point yields that point, no matter the fraction.
    /// 3. `fraction <= 0` yields the first point.
    /// 4. `fraction >= 1` yields the last point.
    /// 5. Otherwise, the point at the time at that fraction.
    ///
    /// Errors only come from the time and point lookups, and are passed through untouched.
    pub fn apply<T: Track>(&self, path: &T, fraction: f64) -> Result<T::Point> {
        let pts = path.points();
        let (first, last) = match (pts.first(), pts.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(T::Point::zero()),
        };
        if pts.len() == 1 || fraction <= 0.0 {
            return Ok(first.clone());
        }
        if fraction >= 1.0 {
            return Ok(last.clone());
        }

        let time = self.time_at_fraction.time_at_fraction(path, fraction)?;
        debug!(
            "{} of the way along a track of {} points is at {}",
            fraction,
            pts.len(),
            time
        );
        self.point_at_time.point_at_time(path, time)
    }
}

/// `PointAtFraction` with the default strategies
pub fn point_at_fraction<T: Track>(path: &T, fraction: f64) -> Result<T::Point> {
    let query: PointAtFraction = PointAtFraction::default();
    query.apply(path, fraction)
}
