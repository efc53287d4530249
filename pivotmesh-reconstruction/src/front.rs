//! The advancing front: mesh edges that may still grow the surface
//!
//! Each live edge is either *active* (not yet pivoted) or *boundary*
//! (pivoting failed). An edge that gets its second triangle is retired to
//! *interior* and leaves the front for good.

use crate::ball_pivoting::{Edge, EdgeKey, Triangle};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    Active,
    Boundary,
    Interior,
}

#[derive(Debug, Clone, Copy)]
struct FrontEdge {
    edge: Edge,
    state: EdgeState,
}

#[derive(Debug, Default)]
pub struct Front {
    edges: HashMap<EdgeKey, FrontEdge>,
    /// Active edges, most recent last. Entries that have since become
    /// boundary or interior are dropped lazily.
    stack: Vec<EdgeKey>,
    interior: HashSet<EdgeKey>,
    /// Number of live (active or boundary) edges touching each point
    incident: HashMap<usize, usize>,
}

impl Front {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently added edge that is still active.
    pub fn active_edge(&mut self) -> Option<Edge> {
        while let Some(key) = self.stack.last() {
            match self.edges.get(key) {
                Some(entry) if entry.state == EdgeState::Active => return Some(entry.edge),
                _ => {
                    self.stack.pop();
                }
            }
        }
        None
    }

    /// Whether `point` lies on at least one active or boundary edge.
    pub fn in_front(&self, point: usize) -> bool {
        self.incident.get(&point).is_some_and(|&count| count > 0)
    }

    /// Give up on an edge: it stays in the front as boundary.
    pub fn set_inactive(&mut self, edge: &Edge) {
        if let Some(entry) = self.edges.get_mut(&edge.key()) {
            entry.state = EdgeState::Boundary;
        }
    }

    /// Whether the triangle found by pivoting `edge` can join the mesh
    /// without giving an interior edge a third face.
    pub fn accepts(&self, edge: &Edge, point: usize) -> bool {
        !self.interior.contains(&EdgeKey::new(edge.source, point))
            && !self.interior.contains(&EdgeKey::new(point, edge.target))
    }

    /// Update the front after `triangle = (source, point, target)` was
    /// accepted by pivoting `edge`.
    ///
    /// A new side already in the front gets its second face and is retired;
    /// otherwise it becomes a fresh active edge. The pivoted edge is now
    /// covered on both sides and is retired as well.
    pub fn join_and_fix(&mut self, edge: &Edge, point: usize, triangle: &Triangle) {
        let sides = [
            (edge.source, point, edge.target),
            (point, edge.target, edge.source),
        ];

        for (source, target, opposite) in sides {
            let key = EdgeKey::new(source, target);
            if self.edges.contains_key(&key) {
                self.retire(key);
            } else {
                self.insert(Edge {
                    source,
                    target,
                    opposite,
                    ball_center: triangle.ball_center,
                });
            }
        }

        self.retire(edge.key());
    }

    /// Insert the three sides of a seed triangle as active edges.
    pub fn add_edges(&mut self, triangle: &Triangle) {
        for edge in triangle.edges() {
            self.insert(edge);
        }
    }

    /// Current state of the edge between `a` and `b`, if it was ever part of
    /// the front.
    pub fn edge_state(&self, a: usize, b: usize) -> Option<EdgeState> {
        let key = EdgeKey::new(a, b);
        match self.edges.get(&key) {
            Some(entry) => Some(entry.state),
            None if self.interior.contains(&key) => Some(EdgeState::Interior),
            None => None,
        }
    }

    pub fn active_count(&self) -> usize {
        self.count(EdgeState::Active)
    }

    pub fn boundary_count(&self) -> usize {
        self.count(EdgeState::Boundary)
    }

    pub fn interior_count(&self) -> usize {
        self.interior.len()
    }

    /// Boundary edges, ordered by key
    pub fn boundary_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .edges
            .values()
            .filter(|entry| entry.state == EdgeState::Boundary)
            .map(|entry| entry.edge)
            .collect();
        edges.sort_by_key(|edge| edge.key());
        edges
    }

    fn count(&self, state: EdgeState) -> usize {
        self.edges.values().filter(|entry| entry.state == state).count()
    }

    fn insert(&mut self, edge: Edge) {
        let key = edge.key();
        self.edges.insert(
            key,
            FrontEdge {
                edge,
                state: EdgeState::Active,
            },
        );
        self.stack.push(key);
        *self.incident.entry(edge.source).or_insert(0) += 1;
        *self.incident.entry(edge.target).or_insert(0) += 1;
    }

    fn retire(&mut self, key: EdgeKey) {
        if self.edges.remove(&key).is_some() {
            for v in [key.v1, key.v2] {
                if let Some(count) = self.incident.get_mut(&v) {
                    *count -= 1;
                    if *count == 0 {
                        self.incident.remove(&v);
                    }
                }
            }
        }
        self.interior.insert(key);
    }
}
