//! Geometry kernel: ball centers, the empty-ball test and triangle orientation
//!
//! Everything here is a pure function of its arguments. Degenerate input
//! (coincident or collinear points, a ball too small for the triangle) is
//! reported as `None` so that callers can skip the candidate.

use pivotmesh_core::{Point3d, Vector3d};
use std::f64::consts::TAU;

/// Relative threshold on `|a x b|^2 / (|a|^2 |b|^2)` below which three points
/// are treated as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-12;

/// Points closer to the sphere surface than `radius * EMPTY_BALL_TOLERANCE`
/// count as lying on it, not inside it.
pub const EMPTY_BALL_TOLERANCE: f64 = 1e-6;

/// Rotation angles this close to a full turn are folded back to zero.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Center of the circle through three points, or `None` when they are
/// (nearly) collinear.
pub fn circumcenter(p0: &Point3d, p1: &Point3d, p2: &Point3d) -> Option<Point3d> {
    let a = p0 - p2;
    let b = p1 - p2;
    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let axb = a.cross(&b);
    let axb2 = axb.norm_squared();

    if a2 == 0.0 || b2 == 0.0 || axb2 <= COLLINEAR_EPSILON * a2 * b2 {
        return None;
    }

    let offset = (b * a2 - a * b2).cross(&axb) / (2.0 * axb2);
    Some(p2 + offset)
}

/// Center of the ball of `radius` touching all three points, on the side
/// the triangle normal `(p1 - p0) x (p2 - p0)` points to.
///
/// Returns `None` for degenerate triangles and when the circumradius exceeds
/// `radius`.
pub fn ball_center(p0: &Point3d, p1: &Point3d, p2: &Point3d, radius: f64) -> Option<Point3d> {
    let center = circumcenter(p0, p1, p2)?;
    let normal = (p1 - p0).cross(&(p2 - p0)).try_normalize(0.0)?;

    let circumradius2 = (p0 - center).norm_squared();
    let height2 = radius * radius - circumradius2;
    if height2 < 0.0 {
        return None;
    }

    Some(center + normal * height2.sqrt())
}

/// True when no candidate other than `excluded` lies strictly inside the
/// sphere of `radius` around `center`.
pub fn is_empty<I>(center: &Point3d, radius: f64, candidates: I, excluded: [usize; 3]) -> bool
where
    I: IntoIterator<Item = (usize, Point3d)>,
{
    let limit = radius * (1.0 - EMPTY_BALL_TOLERANCE);
    let limit2 = limit * limit;

    candidates
        .into_iter()
        .all(|(i, p)| excluded.contains(&i) || (p - center).norm_squared() >= limit2)
}

/// Order three vertices so the triangle's normal agrees with `outward`.
///
/// Keeps `ids` as given when `(p1 - p0) x (p2 - p0)` points along
/// `outward`, otherwise swaps the last two. `None` if the face normal is
/// degenerate or perpendicular to `outward`.
pub fn orient(ids: [usize; 3], points: [&Point3d; 3], outward: &Vector3d) -> Option<[usize; 3]> {
    let normal = (points[1] - points[0]).cross(&(points[2] - points[0]));
    let alignment = normal.dot(outward);

    if alignment.abs() <= f64::EPSILON * normal.norm() * outward.norm() {
        return None;
    }

    if alignment > 0.0 {
        Some(ids)
    } else {
        Some([ids[0], ids[2], ids[1]])
    }
}

/// Unit normal of the triangle `(p0, p1, p2)` following its winding.
pub fn face_normal(p0: &Point3d, p1: &Point3d, p2: &Point3d) -> Option<Vector3d> {
    (p1 - p0).cross(&(p2 - p0)).try_normalize(0.0)
}

/// Angle in `[0, 2pi)` the ball center rotates through when it rolls from
/// `from` to `to` around `axis` (unit length) passing through `pivot`.
/// Positive angles follow the right-hand rule around `axis`.
pub fn pivot_angle(axis: &Vector3d, pivot: &Point3d, from: &Point3d, to: &Point3d) -> f64 {
    let project = |v: Vector3d| v - axis * axis.dot(&v);
    let u0 = project(from - pivot);
    let u1 = project(to - pivot);

    let mut angle = axis.dot(&u0.cross(&u1)).atan2(u0.dot(&u1));
    if angle < 0.0 {
        angle += TAU;
    }
    if angle >= TAU - ANGLE_EPSILON {
        angle = 0.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn p(x: f64, y: f64, z: f64) -> Point3d {
        Point3d::new(x, y, z)
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        let c = circumcenter(&p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0), &p(0.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(c, p(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_tilted_triangle_is_equidistant() {
        let (a, b, c) = (p(0.3, -1.0, 2.0), p(1.7, 0.4, 0.5), p(-0.6, 0.9, 1.1));
        let center = circumcenter(&a, &b, &c).unwrap();
        let r = (a - center).norm();
        assert_relative_eq!((b - center).norm(), r, epsilon = 1e-10);
        assert_relative_eq!((c - center).norm(), r, epsilon = 1e-10);
        // The circumcenter lies in the triangle's plane.
        let n = face_normal(&a, &b, &c).unwrap();
        assert_relative_eq!(n.dot(&(center - a)), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_degenerate_input() {
        let a = p(0.0, 0.0, 0.0);
        assert!(circumcenter(&a, &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0)).is_none());
        assert!(circumcenter(&a, &a, &p(1.0, 1.0, 0.0)).is_none());
        assert!(ball_center(&a, &p(1.0, 0.0, 0.0), &p(3.0, 0.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_ball_center_height_and_side() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0));
        // circumradius sqrt(2), so height = sqrt(4 - 2)
        let center = ball_center(&a, &b, &c, 2.0).unwrap();
        assert_relative_eq!(center, p(1.0, 1.0, 2.0_f64.sqrt()), epsilon = 1e-12);

        let flipped = ball_center(&a, &c, &b, 2.0).unwrap();
        assert_relative_eq!(flipped, p(1.0, 1.0, -(2.0_f64.sqrt())), epsilon = 1e-12);

        for q in [a, b, c] {
            assert_relative_eq!((q - center).norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ball_too_small() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0));
        assert!(ball_center(&a, &b, &c, 1.0).is_none());
    }

    #[test]
    fn test_is_empty_rejects_interior_point() {
        let center = p(0.0, 0.0, 0.0);
        let points = vec![(0, p(1.0, 0.0, 0.0)), (1, p(0.0, 1.0, 0.0)), (2, p(0.0, 0.0, 1.0)), (3, p(0.1, 0.1, 0.1))];
        assert!(!is_empty(&center, 1.0, points.clone(), [0, 1, 2]));
        // Once the interior point is one of the touched vertices the ball is empty again.
        assert!(is_empty(&center, 1.0, points, [0, 1, 3]));
    }

    #[test]
    fn test_is_empty_ignores_points_on_the_surface() {
        let center = p(0.0, 0.0, 0.0);
        let points = vec![
            (0, p(1.0, 0.0, 0.0)),
            (1, p(0.0, 1.0, 0.0)),
            (2, p(-1.0, 0.0, 0.0)),
            (3, p(0.0, -1.0, 0.0)),
            (4, p(3.0, 0.0, 0.0)),
        ];
        assert!(is_empty(&center, 1.0, points, [0, 1, 2]));
    }

    #[test]
    fn test_orient_follows_outward() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let up = Vector3d::z();
        assert_eq!(orient([0, 1, 2], [&a, &b, &c], &up), Some([0, 1, 2]));
        assert_eq!(orient([0, 1, 2], [&a, &b, &c], &-up), Some([0, 2, 1]));
        assert_eq!(orient([0, 1, 2], [&a, &b, &c], &Vector3d::x()), None);
    }

    #[test]
    fn test_pivot_angle_direction() {
        let axis = Vector3d::x();
        let pivot = p(0.0, 0.0, 0.0);
        let from = p(0.0, 0.0, 1.0);

        assert_relative_eq!(pivot_angle(&axis, &pivot, &from, &p(0.0, -1.0, 0.0)), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(pivot_angle(&axis, &pivot, &from, &p(0.0, 0.0, -1.0)), PI, epsilon = 1e-12);
        assert_relative_eq!(pivot_angle(&axis, &pivot, &from, &p(0.0, 1.0, 0.0)), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(pivot_angle(&axis, &pivot, &from, &from), 0.0);
    }

    #[test]
    fn test_pivot_angle_ignores_offset_along_axis() {
        let axis = Vector3d::x();
        let pivot = p(0.0, 0.0, 0.0);
        let angle = pivot_angle(&axis, &pivot, &p(5.0, 0.0, 1.0), &p(-2.0, -1.0, 0.0));
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-12);
    }
}
