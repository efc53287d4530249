//! Spatial index over the input points
//!
//! An R*-tree of point positions tagged with their cloud index. Built once
//! before reconstruction and only queried afterwards, so it can be shared
//! freely between threads during parallel seed search.

use pivotmesh_core::{NeighborSearch, Point3d};
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

pub struct SpatialIndex {
    rtree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Bulk-load the index from positions in cloud order.
    pub fn new(positions: &[Point3d]) -> Self {
        let items: Vec<IndexedPoint> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y, p.z], i))
            .collect();

        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}

impl NeighborSearch for SpatialIndex {
    fn neighbors(&self, query: &Point3d, distance: f64) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .rtree
            .locate_within_distance([query.x, query.y, query.z], distance * distance)
            .map(|item| item.data)
            .collect();
        found.sort_unstable();
        found
    }
}
