use serde::{Deserialize, Serialize};

use crate::point::{lerp, Point};
use crate::properties::{interpolate_properties, nearest, PropertyMap, PropertyValue};
use crate::time::{interpolate_timestamps, micros, Timestamp};

/// What the trajectory algorithms need from a single sample.
pub trait TrackPoint: Clone {
    /// The neutral sample, returned for an empty trajectory.
    fn zero() -> Self;
    fn timestamp(&self) -> Timestamp;
    /// Distance traveled along the trajectory up to this sample. Negative means unset.
    fn current_length(&self) -> f64;
    /// At `t <= 0` this must return `self` exactly, and `other` at `t >= 1`.
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

/// A position decorated with an object ID, a timestamp, and arbitrary named properties.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrajectoryPoint<P> {
    pub pos: P,
    pub object_id: String,
    pub timestamp: Timestamp,
    /// Set by `Trajectory::new`; -1 until then.
    pub current_length: f64,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl<P: Point> TrajectoryPoint<P> {
    pub fn new(pos: P, object_id: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            pos,
            object_id: object_id.into(),
            timestamp,
            current_length: -1.0,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Native distance units per second. Points less than a millisecond apart have no speed.
    pub fn speed_between(&self, other: &Self) -> f64 {
        let seconds = micros(other.timestamp - self.timestamp) / 1_000_000.0;
        if seconds.abs() < 0.001 {
            return 0.0;
        }
        self.pos.distance(&other.pos) / seconds
    }
}

// The cumulative length is bookkeeping owned by the trajectory, so it doesn't count.
impl<P: PartialEq> PartialEq for TrajectoryPoint<P> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.object_id == other.object_id
            && self.timestamp == other.timestamp
            && self.properties == other.properties
    }
}

impl<P: Point> TrackPoint for TrajectoryPoint<P> {
    fn zero() -> Self {
        Self::new(P::zero(), "", Timestamp::default())
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn current_length(&self) -> f64 {
        self.current_length
    }

    fn interpolate(&self, other: &Self, t: f64) -> Self {
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return other.clone();
        }
        Self {
            pos: self.pos.interpolate(&other.pos, t),
            object_id: nearest(&self.object_id, &other.object_id, t).clone(),
            timestamp: interpolate_timestamps(self.timestamp, other.timestamp, t),
            current_length: lerp(self.current_length, other.current_length, t),
            properties: interpolate_properties(&self.properties, &other.properties, t),
        }
    }
}
