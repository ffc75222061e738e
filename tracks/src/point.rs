use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// The geometric operations the trajectory algorithms need from a coordinate type. Nothing here
/// assumes a particular dimensionality.
pub trait Point: Clone + PartialEq + Debug {
    /// The neutral value, used when there's nothing better to return.
    fn zero() -> Self;

    fn distance(&self, other: &Self) -> f64;

    /// Linear interpolation. At `t <= 0` this is `self`, at `t >= 1` it's `other`.
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    pub x: f64,
    pub y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Point for Pt2D {
    fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn interpolate(&self, other: &Self, t: f64) -> Self {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        Self::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pt3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Point for Pt3D {
    fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn interpolate(&self, other: &Self, t: f64) -> Self {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        Self::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
