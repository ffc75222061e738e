use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::point_at_fraction::PointAtFraction;
use super::point_at_time::InterpolatedPointAtTime;
use super::time_at_fraction::{DistanceTimeAtFraction, ElapsedTimeAtFraction, TimeAtFraction};
use crate::point::Point;
use crate::trajectory::{Track, Trajectory};

/// How to turn a fraction of the track into a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionStrategy {
    /// A share of the elapsed time
    Elapsed,
    /// A share of the cumulative length
    Distance,
}

impl Default for FractionStrategy {
    fn default() -> Self {
        FractionStrategy::Elapsed
    }
}

impl std::str::FromStr for FractionStrategy {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "elapsed" => Ok(FractionStrategy::Elapsed),
            "distance" => Ok(FractionStrategy::Distance),
            _ => bail!("Unknown fraction strategy {}, use elapsed or distance", raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResampleOptions {
    /// How many points to produce, including both endpoints
    pub count: usize,
    #[serde(default)]
    pub strategy: FractionStrategy,
}

impl ResampleOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            strategy: FractionStrategy::default(),
        }
    }
}

/// Produces `opts.count` points at evenly spaced fractions of the path. The first and last
/// samples are exactly the path's endpoints.
pub fn resample<P: Point>(path: &Trajectory<P>, opts: &ResampleOptions) -> Result<Trajectory<P>> {
    match opts.strategy {
        FractionStrategy::Elapsed => resample_with(
            path,
            opts.count,
            &PointAtFraction::new(ElapsedTimeAtFraction, InterpolatedPointAtTime),
        ),
        FractionStrategy::Distance => resample_with(
            path,
            opts.count,
            &PointAtFraction::new(DistanceTimeAtFraction, InterpolatedPointAtTime),
        ),
    }
}

fn resample_with<P: Point, F: TimeAtFraction>(
    path: &Trajectory<P>,
    count: usize,
    query: &PointAtFraction<F, InterpolatedPointAtTime>,
) -> Result<Trajectory<P>> {
    if count == 0 {
        bail!("Can't resample to 0 points");
    }
    if path.is_empty() {
        return Ok(Trajectory::empty());
    }

    let mut pts = Vec::with_capacity(count);
    for i in 0..count {
        let fraction = if count == 1 {
            0.0
        } else {
            i as f64 / (count - 1) as f64
        };
        pts.push(query.apply(path, fraction)?);
    }
    info!(
        "Resampled {:?} from {} to {} points",
        path.object_id(),
        path.len(),
        pts.len()
    );
    // Cumulative lengths are recomputed along the new, coarser path
    Trajectory::new(pts)
}
