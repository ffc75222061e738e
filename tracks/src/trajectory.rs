use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::time::Timestamp;
use crate::trajectory_point::{TrackPoint, TrajectoryPoint};

/// Read-only access to an ordered, timestamped sequence of points. Order is both temporal and
/// along the path, so timestamps and cumulative lengths never decrease. The algorithms only rely
/// on this interface, not on any particular storage.
///
/// Points are exposed as a contiguous slice because the lookups binary search with
/// `partition_point`.
pub trait Track {
    type Point: TrackPoint;

    fn points(&self) -> &[Self::Point];

    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    fn len(&self) -> usize {
        self.points().len()
    }

    fn first(&self) -> Option<&Self::Point> {
        self.points().first()
    }

    fn last(&self) -> Option<&Self::Point> {
        self.points().last()
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Point> {
        self.points().iter()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<P> {
    inner: Vec<TrajectoryPoint<P>>,
}

impl<P: Point> Trajectory<P> {
    /// Validates the ordering and fills out each point's cumulative length. Equal adjacent
    /// timestamps are fine.
    pub fn new(mut raw: Vec<TrajectoryPoint<P>>) -> Result<Self> {
        for pair in raw.windows(2) {
            if pair[0].timestamp > pair[1].timestamp {
                bail!(
                    "Trajectory input out-of-order: {} then {}",
                    pair[0].timestamp,
                    pair[1].timestamp
                );
            }
        }

        let mut dist_so_far = 0.0;
        for idx in 0..raw.len() {
            if idx > 0 {
                dist_so_far += raw[idx - 1].pos.distance(&raw[idx].pos);
            }
            raw[idx].current_length = dist_so_far;
        }
        Ok(Self { inner: raw })
    }

    pub fn empty() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.inner.first().map(|pt| pt.timestamp)
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.inner.last().map(|pt| pt.timestamp)
    }

    pub fn duration(&self) -> Duration {
        match (self.start_time(), self.end_time()) {
            (Some(t1), Some(t2)) => t2 - t1,
            _ => Duration::zero(),
        }
    }

    /// Total distance along the path
    pub fn length(&self) -> f64 {
        self.inner.last().map(|pt| pt.current_length).unwrap_or(0.0)
    }

    /// Taken from the first point; every point normally shares it.
    pub fn object_id(&self) -> Option<&str> {
        self.inner.first().map(|pt| pt.object_id.as_str())
    }

    pub fn into_points(self) -> Vec<TrajectoryPoint<P>> {
        self.inner
    }
}

impl<P: Point> Track for Trajectory<P> {
    type Point = TrajectoryPoint<P>;

    fn points(&self) -> &[TrajectoryPoint<P>] {
        &self.inner
    }
}
