//! Ball Pivoting Algorithm
//!
//! Mesh elements produced by pivoting and the one-call entry points. The
//! moving parts live in [`crate::pivoter`], [`crate::front`] and
//! [`crate::driver`].

use crate::config::BpaConfig;
use crate::driver::Reconstructor;
use crate::observer::NoopObserver;
use pivotmesh_core::{NormalPointCloud3f, Point3d, Result, TriangleMesh};
use std::fmt;

/// Unordered pair of point indices identifying an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v1: usize,
    pub v2: usize,
}

impl EdgeKey {
    pub fn new(v1: usize, v2: usize) -> Self {
        if v1 < v2 {
            EdgeKey { v1, v2 }
        } else {
            EdgeKey { v1: v2, v2: v1 }
        }
    }
}

/// Mesh edge as seen from the triangle that created it.
///
/// `source -> target` follows that triangle's winding, `opposite` is its
/// third vertex and `ball_center` the center of the ball that validated it;
/// pivoting starts from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub opposite: usize,
    pub ball_center: Point3d,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) opposite {}", self.source, self.target, self.opposite)
    }
}

/// Triangle emitted by the reconstruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Counter-clockwise when seen from the side the point normals face
    pub vertices: [usize; 3],
    /// Center of the empty ball touching the three vertices
    pub ball_center: Point3d,
}

impl Triangle {
    pub fn new(vertices: [usize; 3], ball_center: Point3d) -> Self {
        Triangle { vertices, ball_center }
    }

    /// The three sides in winding order, each with the remaining vertex as
    /// its opposite.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        let edge = |source, target, opposite| Edge {
            source,
            target,
            opposite,
            ball_center: self.ball_center,
        };
        [edge(a, b, c), edge(b, c, a), edge(c, a, b)]
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertices;
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// Ball Pivoting Algorithm for surface reconstruction
///
/// This function reconstructs a triangle mesh from an oriented point cloud
/// using the Ball Pivoting Algorithm.
///
/// # Arguments
/// * `cloud` - Point cloud with normal information
/// * `ball_radius` - Radius of the ball used for reconstruction
///
/// # Returns
/// * `Result<TriangleMesh>` - Reconstructed triangle mesh
pub fn ball_pivoting(cloud: &NormalPointCloud3f, ball_radius: f64) -> Result<TriangleMesh> {
    reconstruct(cloud, &BpaConfig::with_radius(ball_radius))
}

/// Ball Pivoting Algorithm with configuration
///
/// Fails only if the cloud is empty or invalid, or the configuration is.
/// A radius too small to touch any three points yields a mesh without faces.
pub fn reconstruct(cloud: &NormalPointCloud3f, config: &BpaConfig) -> Result<TriangleMesh> {
    let mut reconstructor = Reconstructor::new(cloud, config.clone())?;
    reconstructor.run(&mut NoopObserver);
    Ok(reconstructor.into_reconstruction().to_mesh(cloud))
}
