//! Pivoting and seed search
//!
//! The pivoter only answers geometric questions: which triangle the ball
//! reaches when it rolls over an edge, and where a fresh seed triangle can
//! be placed. It never changes the point store or the front; accepting a
//! result is the driver's job.

use crate::ball_pivoting::{Edge, Triangle};
use crate::geometry;
use crate::spatial::SpatialIndex;
use crate::store::PointStore;
use pivotmesh_core::{NeighborSearch, Point3d};
use tracing::trace;

/// Result of rolling the ball over an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotOutcome {
    /// The ball hit `point`, forming `triangle = (source, point, target)`
    Found { point: usize, triangle: Triangle },
    /// No point can be reached with an empty ball
    NotFound,
}

impl PivotOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PivotOutcome::Found { .. })
    }
}

pub struct Pivoter<'a> {
    store: &'a PointStore,
    index: &'a SpatialIndex,
    radius: f64,
}

impl<'a> Pivoter<'a> {
    pub fn new(store: &'a PointStore, index: &'a SpatialIndex, radius: f64) -> Self {
        Self { store, index, radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn store(&self) -> &'a PointStore {
        self.store
    }

    pub fn is_used(&self, point: usize) -> bool {
        self.store.is_used(point)
    }

    /// Roll the ball over `edge`, starting from the ball that created it.
    ///
    /// Every neighbor of the edge midpoint within two radii that yields an
    /// empty, correctly oriented ball is a candidate; the one reached after
    /// the smallest rotation wins, ties going to the lower point index.
    pub fn pivot(&self, edge: &Edge) -> PivotOutcome {
        let (i, j) = (edge.source, edge.target);
        let (pi, pj) = (self.store.position(i), self.store.position(j));
        let Some(axis) = (pj - pi).try_normalize(0.0) else {
            return PivotOutcome::NotFound;
        };
        let midpoint = Point3d::from((pi.coords + pj.coords) * 0.5);
        let neighborhood = self.index.neighbors(&midpoint, 2.0 * self.radius);

        let mut best: Option<(f64, Triangle)> = None;
        for &k in &neighborhood {
            if k == i || k == j || k == edge.opposite {
                continue;
            }
            let Some(center) = self.pivot_ball([i, k, j], &neighborhood) else {
                continue;
            };

            let angle = geometry::pivot_angle(&axis, &midpoint, &edge.ball_center, &center);
            trace!(edge = %edge, candidate = k, angle, "pivot candidate");
            if best.as_ref().map_or(true, |(best_angle, _)| angle < *best_angle) {
                best = Some((angle, Triangle::new([i, k, j], center)));
            }
        }

        match best {
            Some((_, triangle)) => PivotOutcome::Found {
                point: triangle.vertices[1],
                triangle,
            },
            None => PivotOutcome::NotFound,
        }
    }

    /// Ball through the pivot triangle `(source, candidate, target)`, if it
    /// faces the same way as the point normals and is empty.
    fn pivot_ball(&self, ids: [usize; 3], neighborhood: &[usize]) -> Option<Point3d> {
        let [a, b, c] = ids.map(|v| self.store.position(v));
        let normal = geometry::face_normal(a, b, c)?;
        if normal.dot(&self.store.outward(ids)) <= 0.0 {
            return None;
        }

        let center = geometry::ball_center(a, b, c, self.radius)?;
        self.is_empty_ball(&center, neighborhood, ids).then_some(center)
    }

    /// Sequential seed search: the first seed found scanning unused points
    /// in ascending index order.
    pub fn find_seed(&self) -> Option<Triangle> {
        self.store.unused().find_map(|p| self.seed_from(p))
    }

    /// First valid seed triangle having `point` as a vertex, with the other
    /// two vertices taken from the unused neighbors of `point` in ascending
    /// pair order.
    pub fn seed_from(&self, point: usize) -> Option<Triangle> {
        if self.store.is_used(point) {
            return None;
        }

        let neighborhood = self.index.neighbors(self.store.position(point), 2.0 * self.radius);
        let candidates: Vec<usize> = neighborhood
            .iter()
            .copied()
            .filter(|&q| q != point && !self.store.is_used(q))
            .collect();

        for (n, &q) in candidates.iter().enumerate() {
            for &r in &candidates[n + 1..] {
                if let Some(triangle) = self.seed_triangle([point, q, r], &neighborhood) {
                    return Some(triangle);
                }
            }
        }
        None
    }

    fn seed_triangle(&self, ids: [usize; 3], neighborhood: &[usize]) -> Option<Triangle> {
        let outward = self.store.outward(ids);
        let ordered = geometry::orient(ids, ids.map(|v| self.store.position(v)), &outward)?;

        let [a, b, c] = ordered.map(|v| self.store.position(v));
        let normal = geometry::face_normal(a, b, c)?;
        // The averaged vertex normal decides the side the ball sits on.
        if normal.dot(&outward) <= 0.0 {
            return None;
        }

        let center = geometry::ball_center(a, b, c, self.radius)?;
        if !self.is_empty_ball(&center, neighborhood, ordered) {
            trace!(?ordered, "seed candidate rejected, ball not empty");
            return None;
        }
        Some(Triangle::new(ordered, center))
    }

    /// Empty-ball test against the points of `neighborhood`.
    pub fn is_empty_ball(&self, center: &Point3d, neighborhood: &[usize], excluded: [usize; 3]) -> bool {
        geometry::is_empty(
            center,
            self.radius,
            neighborhood.iter().map(|&q| (q, *self.store.position(q))),
            excluded,
        )
    }
}
