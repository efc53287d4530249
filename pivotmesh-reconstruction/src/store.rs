//! Point/normal store with per-point usage flags

use pivotmesh_core::{NormalPointCloud3f, Point3d, Vector3d};

/// Immutable positions and normals of the input cloud, plus the "used" flag
/// of every point. A flag is set when the point becomes a vertex of an
/// accepted triangle and is never cleared.
#[derive(Debug, Clone)]
pub struct PointStore {
    positions: Vec<Point3d>,
    normals: Vec<Vector3d>,
    used: Vec<bool>,
    used_count: usize,
}

impl PointStore {
    /// Copy the cloud into double precision. Normals are rescaled to unit length.
    pub fn new(cloud: &NormalPointCloud3f) -> Self {
        let positions = cloud.iter().map(|p| p.position_f64()).collect();
        let normals = cloud
            .iter()
            .map(|p| {
                let n = p.normal_f64();
                n.try_normalize(f64::EPSILON).unwrap_or(n)
            })
            .collect();

        Self {
            positions,
            normals,
            used: vec![false; cloud.len()],
            used_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, index: usize) -> &Point3d {
        &self.positions[index]
    }

    #[inline]
    pub fn normal(&self, index: usize) -> &Vector3d {
        &self.normals[index]
    }

    pub fn positions(&self) -> &[Point3d] {
        &self.positions
    }

    #[inline]
    pub fn is_used(&self, index: usize) -> bool {
        self.used[index]
    }

    /// Flag the vertices of an accepted triangle.
    pub fn mark_used(&mut self, vertices: [usize; 3]) {
        for v in vertices {
            if !self.used[v] {
                self.used[v] = true;
                self.used_count += 1;
            }
        }
    }

    pub fn used_count(&self) -> usize {
        self.used_count
    }

    /// Unused point indices in ascending order
    pub fn unused(&self) -> impl Iterator<Item = usize> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(i, _)| i)
    }

    /// Sum of the normals of three points, the outward direction of a
    /// triangle through them.
    pub fn outward(&self, vertices: [usize; 3]) -> Vector3d {
        vertices.iter().map(|&v| self.normal(v)).sum()
    }
}
