//! Core traits for pivotmesh

use crate::point::Point3d;

/// Fixed-distance neighbor queries over an indexed point set
pub trait NeighborSearch {
    /// Indices of all points within `distance` of `query` (inclusive),
    /// in ascending index order.
    fn neighbors(&self, query: &Point3d, distance: f64) -> Vec<usize>;
}
