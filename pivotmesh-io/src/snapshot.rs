//! Debug snapshots of a reconstruction in progress
//!
//! A snapshot is a handful of PLY files sharing one label: the partial mesh,
//! and depending on the [`DrawMask`], the input cloud, the highlighted
//! triangle or edge, and the ball that produced it.

use crate::error::IoResult;
use crate::ply::PlyWriter;
use pivotmesh_core::{NormalPointCloud3f, Point3d, Point3f, TriangleMesh, Vector3f};
use std::fs;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selects which auxiliary files a snapshot writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawMask(u8);

impl DrawMask {
    pub const NONE: DrawMask = DrawMask(0);
    /// Prefix file names with a running counter instead of overwriting
    pub const ADD_SEQUENTIAL: DrawMask = DrawMask(0x01);
    /// Write the input cloud
    pub const DRAW_CLOUD: DrawMask = DrawMask(0x02);
    /// Include normals with the cloud
    pub const DRAW_NORMALS: DrawMask = DrawMask(0x04);
    /// Write the highlighted ball as a sphere mesh
    pub const DRAW_SPHERES: DrawMask = DrawMask(0x08);

    pub fn contains(self, other: DrawMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DrawMask {
    type Output = DrawMask;

    fn bitor(self, rhs: DrawMask) -> DrawMask {
        DrawMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for DrawMask {
    fn bitor_assign(&mut self, rhs: DrawMask) {
        self.0 |= rhs.0;
    }
}

/// Element singled out in a snapshot, with the center of its ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Highlight {
    Triangle { vertices: [usize; 3], ball_center: Point3d },
    Edge { source: usize, target: usize, ball_center: Point3d },
}

impl Highlight {
    pub fn ball_center(&self) -> Point3d {
        match *self {
            Highlight::Triangle { ball_center, .. } | Highlight::Edge { ball_center, .. } => ball_center,
        }
    }
}

/// Writes labelled snapshots into one directory
#[derive(Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
    mask: DrawMask,
    ball_radius: f64,
    counter: usize,
}

impl SnapshotWriter {
    pub fn new<P: Into<PathBuf>>(dir: P, mask: DrawMask, ball_radius: f64) -> Self {
        Self {
            dir: dir.into(),
            mask,
            ball_radius,
            counter: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of snapshots written so far
    pub fn count(&self) -> usize {
        self.counter
    }

    /// Write one snapshot and return the files it produced.
    ///
    /// `faces` index into `cloud`.
    pub fn write(
        &mut self,
        label: &str,
        cloud: &NormalPointCloud3f,
        faces: &[[usize; 3]],
        highlight: Option<&Highlight>,
    ) -> IoResult<Vec<PathBuf>> {
        let stem = if self.mask.contains(DrawMask::ADD_SEQUENTIAL) {
            format!("{:05}_{}", self.counter, label)
        } else {
            label.to_string()
        };
        self.counter += 1;

        let mut written = Vec::new();

        let mesh_path = self.dir.join(format!("{}.ply", stem));
        let mesh = TriangleMesh::from_vertices_and_faces(cloud.positions(), faces.to_vec());
        PlyWriter::write_mesh(&mesh, &mesh_path)?;
        written.push(mesh_path);

        if self.mask.contains(DrawMask::DRAW_CLOUD) {
            let path = self.dir.join(format!("{}_cloud.ply", stem));
            PlyWriter::write_cloud(cloud, self.mask.contains(DrawMask::DRAW_NORMALS), &path)?;
            written.push(path);
        }

        if let Some(highlight) = highlight {
            let path = self.dir.join(format!("{}_highlight.ply", stem));
            match *highlight {
                Highlight::Triangle { vertices, .. } => {
                    let corners = vertices.map(|v| cloud[v].position).to_vec();
                    PlyWriter::write_mesh(&TriangleMesh::from_vertices_and_faces(corners, vec![[0, 1, 2]]), &path)?;
                }
                Highlight::Edge { source, target, .. } => {
                    PlyWriter::write_segment(cloud[source].position, cloud[target].position, &path)?;
                }
            }
            written.push(path);

            if self.mask.contains(DrawMask::DRAW_SPHERES) {
                let path = self.dir.join(format!("{}_sphere.ply", stem));
                let center: Point3f = highlight.ball_center().cast();
                PlyWriter::write_mesh(&sphere_mesh(center, self.ball_radius as f32, 8, 12), &path)?;
                written.push(path);
            }
        }

        debug!(label, files = written.len(), "snapshot written");
        Ok(written)
    }
}

/// Create `dir` if needed and remove the `.ply`/`.obj` files a previous run
/// left in it. Returns how many files were removed.
pub fn prepare_output_dir<P: AsRef<Path>>(dir: P) -> IoResult<usize> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_output = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ply") || ext.eq_ignore_ascii_case("obj"));
        if is_output && path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// UV sphere with outward-facing triangles
pub fn sphere_mesh(center: Point3f, radius: f32, rings: usize, segments: usize) -> TriangleMesh {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut vertices = Vec::with_capacity(2 + (rings - 1) * segments);
    vertices.push(center + spherical_offset(radius, 0.0, 0.0));
    for i in 1..rings {
        let phi = std::f32::consts::PI * i as f32 / rings as f32;
        for j in 0..segments {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / segments as f32;
            vertices.push(center + spherical_offset(radius, phi, theta));
        }
    }
    let bottom = vertices.len();
    vertices.push(center + spherical_offset(radius, std::f32::consts::PI, 0.0));

    let ring = |i: usize, j: usize| 1 + (i - 1) * segments + j % segments;
    let mut faces = Vec::with_capacity(2 * segments * (rings - 1));
    for j in 0..segments {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..rings - 1 {
        for j in 0..segments {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            faces.push([a, c, d]);
            faces.push([a, d, b]);
        }
    }
    for j in 0..segments {
        faces.push([bottom, ring(rings - 1, j + 1), ring(rings - 1, j)]);
    }

    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn spherical_offset(radius: f32, phi: f32, theta: f32) -> Vector3f {
    Vector3f::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()) * radius
}
