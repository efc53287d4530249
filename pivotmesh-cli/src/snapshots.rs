//! Debug snapshots of a running reconstruction

use pivotmesh_core::NormalPointCloud3f;
use pivotmesh_io::{DrawMask, Highlight, SnapshotWriter};
use pivotmesh_reconstruction::{BpaConfig, DebugLevel, Edge, ReconstructionObserver, Triangle};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Writes the mesh state to disk as the reconstruction progresses.
///
/// Which events produce files depends on the configured [`DebugLevel`]:
/// `Low` writes a snapshot per added point and per seed, `Medium` adds one
/// per boundary edge, `High` also logs every tested edge.
pub struct SnapshotObserver<'a> {
    cloud: &'a NormalPointCloud3f,
    writer: SnapshotWriter,
    level: DebugLevel,
}

impl<'a> SnapshotObserver<'a> {
    pub fn new(cloud: &'a NormalPointCloud3f, dir: &Path, config: &BpaConfig) -> Self {
        let mut mask = DrawMask::ADD_SEQUENTIAL | DrawMask::DRAW_CLOUD | DrawMask::DRAW_NORMALS;
        if config.draw_spheres {
            mask |= DrawMask::DRAW_SPHERES;
        }
        Self {
            cloud,
            writer: SnapshotWriter::new(dir, mask, config.ball_radius),
            level: config.debug_level,
        }
    }

    pub fn snapshots_written(&self) -> usize {
        self.writer.count()
    }

    fn snapshot(&mut self, label: &str, mesh: &[Triangle], highlight: Option<Highlight>) {
        let faces: Vec<[usize; 3]> = mesh.iter().map(|t| t.vertices).collect();
        // a failed snapshot never stops the reconstruction
        if let Err(e) = self.writer.write(label, self.cloud, &faces, highlight.as_ref()) {
            warn!(label, error = %e, "failed to write snapshot");
        }
    }
}

impl ReconstructionObserver for SnapshotObserver<'_> {
    fn edge_tested(&mut self, edge: &Edge) {
        if self.level >= DebugLevel::High {
            trace!(edge = %edge, "testing edge");
        }
    }

    fn point_added(&mut self, point: usize, triangle: &Triangle, mesh: &[Triangle]) {
        if self.level >= DebugLevel::Low {
            info!(point, triangle = %triangle, "Adding point");
            let highlight = Highlight::Triangle {
                vertices: triangle.vertices,
                ball_center: triangle.ball_center,
            };
            self.snapshot(&format!("addedPoint_{}", point), mesh, Some(highlight));
        }
    }

    fn boundary_marked(&mut self, edge: &Edge, mesh: &[Triangle]) {
        if self.level >= DebugLevel::Low {
            debug!(edge = %edge, "marking boundary");
        }
        if self.level >= DebugLevel::Medium {
            let highlight = Highlight::Edge {
                source: edge.source,
                target: edge.target,
                ball_center: edge.ball_center,
            };
            self.snapshot(&format!("boundary_{}_{}", edge.source, edge.target), mesh, Some(highlight));
        }
    }

    fn seed_found(&mut self, seed: &Triangle, mesh: &[Triangle]) {
        if self.level >= DebugLevel::Low {
            info!(triangle = %seed, "seed found");
            let highlight = Highlight::Triangle {
                vertices: seed.vertices,
                ball_center: seed.ball_center,
            };
            self.snapshot("seed", mesh, Some(highlight));
        }
    }

    fn finished(&mut self, _mesh: &[Triangle]) {
        if self.level > DebugLevel::None {
            info!(snapshots = self.writer.count(), dir = %self.writer.dir().display(), "snapshots written");
        }
    }
}
