//! Answers "where was this path at 30% of the way along?" for timestamped trajectories, along
//! with the time-based lookups that question is built from.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod algorithms;
mod csv_input;
mod point;
mod properties;
mod time;
mod trajectory;
mod trajectory_point;

pub use self::algorithms::{
    point_at_fraction, resample, DistanceTimeAtFraction, ElapsedTimeAtFraction, FractionStrategy,
    InterpolatedPointAtTime, PointAtFraction, PointAtTime, ResampleOptions, TimeAtFraction,
};
pub use self::csv_input::load_csv;
pub use self::point::{Point, Pt2D, Pt3D};
pub use self::properties::{interpolate_properties, PropertyMap, PropertyValue};
pub use self::time::{fraction_between, interpolate_timestamps, parse_timestamp, Timestamp};
pub use self::trajectory::{Track, Trajectory};
pub use self::trajectory_point::{TrackPoint, TrajectoryPoint};
