//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A point with its (outward) surface normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalPoint3f {
    pub position: Point3f,
    pub normal: Vector3f,
}

impl NormalPoint3f {
    pub fn new(position: Point3f, normal: Vector3f) -> Self {
        Self { position, normal }
    }

    /// Position promoted to double precision
    pub fn position_f64(&self) -> Point3d {
        self.position.cast::<f64>()
    }

    /// Normal promoted to double precision
    pub fn normal_f64(&self) -> Vector3d {
        self.normal.cast::<f64>()
    }
}

impl Default for NormalPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_normal_points_up() {
        let p = NormalPoint3f::default();
        assert_eq!(p.normal, Vector3f::z());
        assert_eq!(p.position, Point3f::origin());
    }

    #[test]
    fn test_f64_promotion() {
        let p = NormalPoint3f::new(Point3f::new(0.5, 1.5, -2.0), Vector3f::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.position_f64().y, 1.5);
        assert_relative_eq!(p.normal_f64().y, 1.0);
    }
}
