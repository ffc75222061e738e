use anyhow::Result;

use crate::time::{fraction_between, Timestamp};
use crate::trajectory::Track;
use crate::trajectory_point::TrackPoint;

/// Maps a timestamp to a point on a track.
pub trait PointAtTime {
    fn point_at_time<T: Track>(&self, path: &T, time: Timestamp) -> Result<T::Point>;
}

/// Returns the sample at exactly `time` if there is one, otherwise interpolates between the two
/// samples bracketing it. Times outside the track clamp to the endpoints. If several samples
/// share a timestamp, the earliest one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpolatedPointAtTime;

impl PointAtTime for InterpolatedPointAtTime {
    fn point_at_time<T: Track>(&self, path: &T, time: Timestamp) -> Result<T::Point> {
        let pts = path.points();
        let (first, last) = match (pts.first(), pts.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(T::Point::zero()),
        };
        for pair in pts.windows(2) {
            if pair[0].timestamp() > pair[1].timestamp() {
                bail!(
                    "Track timestamps out-of-order: {} then {}",
                    pair[0].timestamp(),
                    pair[1].timestamp()
                );
            }
        }

        if time <= first.timestamp() {
            return Ok(first.clone());
        }
        if time >= last.timestamp() {
            // The earliest sample already at the end time
            let idx = pts.partition_point(|pt| pt.timestamp() < last.timestamp());
            return Ok(pts[idx].clone());
        }

        // first < time < last, so 0 < idx < len
        let idx = pts.partition_point(|pt| pt.timestamp() < time);
        debug_assert!(idx > 0 && idx < pts.len());
        let hit = &pts[idx];
        if hit.timestamp() == time {
            return Ok(hit.clone());
        }
        let prev = &pts[idx - 1];
        let t = fraction_between(prev.timestamp(), hit.timestamp(), time);
        Ok(prev.interpolate(hit, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::point_at_fraction;
    use crate::point::Pt2D;
    use crate::time::parse_timestamp;
    use crate::trajectory::Trajectory;
    use crate::trajectory_point::TrajectoryPoint;

    fn time(raw: &str) -> Timestamp {
        parse_timestamp(raw).unwrap()
    }

    fn trajectory(raw: Vec<(f64, f64, &str)>) -> Trajectory<Pt2D> {
        Trajectory::new(
            raw.into_iter()
                .map(|(x, y, t)| TrajectoryPoint::new(Pt2D::new(x, y), "bike", time(t)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn interpolates_between_samples() {
        let path = trajectory(vec![
            (0.0, 0.0, "2023-07-04 09:00:00"),
            (10.0, 0.0, "2023-07-04 09:00:10"),
            (10.0, 20.0, "2023-07-04 09:00:30"),
        ]);
        let pt = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 09:00:20"))
            .unwrap();
        assert_eq!(pt.pos, Pt2D::new(10.0, 10.0));
        assert_eq!(pt.timestamp, time("2023-07-04 09:00:20"));
        assert_eq!(pt.current_length, 20.0);

        let exact = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 09:00:10"))
            .unwrap();
        assert_eq!(&exact, &path.points()[1]);
    }

    #[test]
    fn clamps_to_endpoints() {
        let path = trajectory(vec![
            (0.0, 0.0, "2023-07-04 09:00:00"),
            (10.0, 0.0, "2023-07-04 09:00:10"),
        ]);
        let before = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 08:00:00"))
            .unwrap();
        let after = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 10:00:00"))
            .unwrap();
        assert_eq!(Some(&before), path.first());
        assert_eq!(Some(&after), path.last());
    }

    #[test]
    fn earliest_wins_on_duplicate_times() {
        let path = trajectory(vec![
            (0.0, 0.0, "2023-07-04 09:00:00"),
            (5.0, 0.0, "2023-07-04 09:00:05"),
            (7.0, 0.0, "2023-07-04 09:00:05"),
            (9.0, 0.0, "2023-07-04 09:00:09"),
            (9.5, 0.0, "2023-07-04 09:00:09"),
        ]);
        let dup = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 09:00:05"))
            .unwrap();
        assert_eq!(dup.pos, Pt2D::new(5.0, 0.0));

        let end = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 09:00:09"))
            .unwrap();
        assert_eq!(end.pos, Pt2D::new(9.0, 0.0));

        // Between the duplicates and the next sample, interpolate from the last of the group
        let between = InterpolatedPointAtTime
            .point_at_time(&path, time("2023-07-04 09:00:07"))
            .unwrap();
        assert_eq!(between.pos, Pt2D::new(8.0, 0.0));
    }

    #[test]
    fn rejects_decreasing_times_inside_the_track() {
        // Bypasses Trajectory::new, which would catch this
        struct Raw(Vec<TrajectoryPoint<Pt2D>>);
        impl Track for Raw {
            type Point = TrajectoryPoint<Pt2D>;
            fn points(&self) -> &[Self::Point] {
                &self.0
            }
        }

        let raw = Raw(vec![
            TrajectoryPoint::new(Pt2D::new(0.0, 0.0), "x", time("2023-07-04 09:00:00")),
            TrajectoryPoint::new(Pt2D::new(1.0, 0.0), "x", time("2023-07-04 09:00:30")),
            TrajectoryPoint::new(Pt2D::new(2.0, 0.0), "x", time("2023-07-04 09:00:10")),
            TrajectoryPoint::new(Pt2D::new(3.0, 0.0), "x", time("2023-07-04 09:00:40")),
        ]);
        let err = InterpolatedPointAtTime
            .point_at_time(&raw, time("2023-07-04 09:00:20"))
            .unwrap_err();
        assert!(err.to_string().contains("out-of-order"));

        // The endpoints are in order, so this gets past the time lookup
        let err = point_at_fraction(&raw, 0.5).unwrap_err();
        assert!(err.to_string().contains("out-of-order"));
    }

    #[test]
    fn empty_is_zero() {
        let pt = InterpolatedPointAtTime
            .point_at_time(&Trajectory::<Pt2D>::empty(), time("2023-07-04 09:00:00"))
            .unwrap();
        assert_eq!(pt, TrajectoryPoint::<Pt2D>::zero());
    }
}
