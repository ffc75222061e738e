mod point_at_fraction;
mod point_at_time;
mod resample;
mod time_at_fraction;

pub use self::point_at_fraction::{point_at_fraction, PointAtFraction};
pub use self::point_at_time::{InterpolatedPointAtTime, PointAtTime};
pub use self::resample::{resample, FractionStrategy, ResampleOptions};
pub use self::time_at_fraction::{DistanceTimeAtFraction, ElapsedTimeAtFraction, TimeAtFraction};
