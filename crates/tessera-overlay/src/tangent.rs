//! Tangent estimation for smooth path interpolation.
//!
//! Each point gets one symmetric tangent: arrive and leave are equal.
//! Direction averages the unit vectors of the adjoining segments;
//! length is half the distance to the next point.

use glam::DVec3;

use tessera_core::constants::{DEFAULT_TANGENT_LENGTH, MIN_PATH_POINTS, TANGENT_SEGMENT_FRACTION};
use tessera_core::SplinePoint;

/// Fill in tangents for every point. No-op for fewer than two points.
pub fn estimate_tangents(points: &mut [SplinePoint]) {
    if points.len() < MIN_PATH_POINTS {
        return;
    }

    let last = points.len() - 1;
    for i in 0..points.len() {
        let direction = if i == 0 {
            (points[1].position - points[0].position).normalize_or_zero()
        } else if i == last {
            (points[i].position - points[i - 1].position).normalize_or_zero()
        } else {
            let incoming = (points[i].position - points[i - 1].position).normalize_or_zero();
            let outgoing = (points[i + 1].position - points[i].position).normalize_or_zero();
            (incoming + outgoing).normalize_or_zero()
        };

        let length = if i < last {
            points[i].position.distance(points[i + 1].position) * TANGENT_SEGMENT_FRACTION
        } else {
            DEFAULT_TANGENT_LENGTH
        };

        let tangent = direction * length;
        points[i].arrive_tangent = tangent;
        points[i].leave_tangent = tangent;
    }
}

/// Build a fresh point sequence with tangents from bare positions.
pub fn spline_from_positions(positions: Vec<DVec3>) -> Vec<SplinePoint> {
    let mut points: Vec<SplinePoint> = positions.into_iter().map(SplinePoint::new).collect();
    estimate_tangents(&mut points);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(actual: DVec3, expected: DVec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-9),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_straight_road_interior_tangent() {
        let points = spline_from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(20.0, 0.0, 0.0),
        ]);
        assert_vec_eq(points[1].arrive_tangent, DVec3::new(5.0, 0.0, 0.0));
        assert_vec_eq(points[1].leave_tangent, DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_endpoints() {
        let points = spline_from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 40.0, 0.0),
        ]);
        // First: toward next, half the segment.
        assert_vec_eq(points[0].leave_tangent, DVec3::new(0.0, 20.0, 0.0));
        // Last: from previous, default length.
        assert_vec_eq(points[1].leave_tangent, DVec3::new(0.0, DEFAULT_TANGENT_LENGTH, 0.0));
    }

    #[test]
    fn test_corner_averages_directions() {
        let points = spline_from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 10.0, 0.0),
        ]);
        let expected_dir = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert_vec_eq(points[1].leave_tangent, expected_dir * 5.0);
    }

    #[test]
    fn test_tangents_are_symmetric() {
        let points = spline_from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 1.0, 2.0),
            DVec3::new(7.0, -4.0, 2.5),
            DVec3::new(7.0, -4.0, 2.5),
            DVec3::new(12.0, 9.0, -1.0),
        ]);
        for p in &points {
            assert_eq!(p.arrive_tangent, p.leave_tangent);
        }
    }

    #[test]
    fn test_duplicate_points_do_not_produce_nan() {
        let points = spline_from_positions(vec![
            DVec3::new(5.0, 5.0, 5.0),
            DVec3::new(5.0, 5.0, 5.0),
            DVec3::new(5.0, 5.0, 5.0),
        ]);
        for p in &points {
            assert!(!p.leave_tangent.is_nan(), "tangent went NaN: {:?}", p.leave_tangent);
            assert_eq!(p.leave_tangent, DVec3::ZERO);
        }
    }

    #[test]
    fn test_zero_segment_contributes_nothing() {
        // Incoming segment is zero-length; direction comes from outgoing alone.
        let points = spline_from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 8.0, 0.0),
        ]);
        assert_vec_eq(points[1].leave_tangent, DVec3::new(0.0, 4.0, 0.0));
        assert_eq!(points[0].leave_tangent, DVec3::ZERO);
    }

    #[test]
    fn test_single_point_untouched() {
        let mut points = vec![SplinePoint::new(DVec3::ONE)];
        estimate_tangents(&mut points);
        assert_eq!(points[0].arrive_tangent, DVec3::ZERO);
        assert_eq!(points[0].leave_tangent, DVec3::ZERO);
    }
}
