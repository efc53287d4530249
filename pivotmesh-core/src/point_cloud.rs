//! Point cloud container

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// A point cloud with normal vectors, the input of ball pivoting
pub type NormalPointCloud3f = PointCloud<NormalPoint3f>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl PointCloud<NormalPoint3f> {
    /// Positions of all points, in index order
    pub fn positions(&self) -> Vec<Point3f> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Normals of all points, in index order
    pub fn normals(&self) -> Vec<Vector3f> {
        self.points.iter().map(|p| p.normal).collect()
    }

    /// Check that every coordinate is finite and every normal has non-zero length.
    pub fn validate(&self) -> Result<()> {
        for (i, p) in self.points.iter().enumerate() {
            if !p.position.coords.iter().all(|c| c.is_finite()) {
                return Err(Error::InvalidData(format!("point {} has a non-finite position", i)));
            }
            let len = p.normal.norm();
            if !len.is_finite() || len <= f32::EPSILON {
                return Err(Error::InvalidData(format!("point {} has a degenerate normal", i)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oriented(x: f32, y: f32, z: f32, normal: Vector3f) -> NormalPoint3f {
        NormalPoint3f::new(Point3f::new(x, y, z), normal)
    }

    #[test]
    fn test_collect_and_index() {
        let cloud: NormalPointCloud3f = (0..4)
            .map(|i| oriented(i as f32, 0.0, 0.0, Vector3f::z()))
            .collect();
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud[2].position.x, 2.0);
        assert_eq!(cloud.positions().len(), 4);
    }

    #[test]
    fn test_validate_rejects_zero_normal() {
        let cloud = PointCloud::from_points(vec![
            oriented(0.0, 0.0, 0.0, Vector3f::z()),
            oriented(1.0, 0.0, 0.0, Vector3f::zeros()),
        ]);
        assert!(cloud.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_position() {
        let cloud = PointCloud::from_points(vec![oriented(f32::NAN, 0.0, 0.0, Vector3f::z())]);
        assert!(cloud.validate().is_err());
    }
}
