//! Hooks into the reconstruction loop
//!
//! The driver reports each lifecycle event to a [`ReconstructionObserver`].
//! Observers cannot fail the run: a sink that hits an error logs it and
//! carries on.

use crate::ball_pivoting::{Edge, Triangle};

pub trait ReconstructionObserver {
    /// An active edge is about to be pivoted
    fn edge_tested(&mut self, _edge: &Edge) {}

    /// Pivoting reached `point` and `triangle` joined the mesh
    fn point_added(&mut self, _point: usize, _triangle: &Triangle, _mesh: &[Triangle]) {}

    /// Pivoting `edge` failed and it stays in the front as boundary
    fn boundary_marked(&mut self, _edge: &Edge, _mesh: &[Triangle]) {}

    /// A new seed started a fresh component
    fn seed_found(&mut self, _seed: &Triangle, _mesh: &[Triangle]) {}

    /// No active edge and no seed remain
    fn finished(&mut self, _mesh: &[Triangle]) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ReconstructionObserver for NoopObserver {}

impl<O: ReconstructionObserver + ?Sized> ReconstructionObserver for &mut O {
    fn edge_tested(&mut self, edge: &Edge) {
        (**self).edge_tested(edge)
    }

    fn point_added(&mut self, point: usize, triangle: &Triangle, mesh: &[Triangle]) {
        (**self).point_added(point, triangle, mesh)
    }

    fn boundary_marked(&mut self, edge: &Edge, mesh: &[Triangle]) {
        (**self).boundary_marked(edge, mesh)
    }

    fn seed_found(&mut self, seed: &Triangle, mesh: &[Triangle]) {
        (**self).seed_found(seed, mesh)
    }

    fn finished(&mut self, mesh: &[Triangle]) {
        (**self).finished(mesh)
    }
}
