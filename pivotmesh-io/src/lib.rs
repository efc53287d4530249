//! I/O operations for oriented point clouds and meshes
//!
//! Reads oriented clouds from PLY and XYZ text files, writes meshes as PLY
//! or OBJ, and writes the debug snapshots of a running reconstruction.

pub mod error;
pub mod obj;
pub mod ply;
pub mod snapshot;
pub mod xyz;

pub use error::*;
pub use obj::ObjWriter;
pub use ply::{PlyReader, PlyWriter};
pub use snapshot::{prepare_output_dir, sphere_mesh, DrawMask, Highlight, SnapshotWriter};
pub use xyz::XyzReader;

use pivotmesh_core::{NormalPointCloud3f, Result, TriangleMesh};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Supported point cloud formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudFormat {
    Ply,
    Xyz,
}

impl CloudFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "ply" => Some(CloudFormat::Ply),
                "xyz" | "txt" | "pts" | "csv" => Some(CloudFormat::Xyz),
                _ => None,
            })
    }
}

/// Supported mesh output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Ply,
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "ply" => Some(MeshFormat::Ply),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

fn open(path: &Path) -> std::result::Result<BufReader<File>, IoError> {
    File::open(path).map(BufReader::new).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })
}

/// Auto-detect format and read an oriented point cloud.
///
/// Normals come back with unit length. A missing file, a parse failure,
/// missing or zero normals, or an empty file are all load errors.
pub fn read_oriented_cloud<P: AsRef<Path>>(path: P) -> Result<NormalPointCloud3f> {
    let path = path.as_ref();
    let format = CloudFormat::from_path(path).ok_or_else(|| IoError::InvalidFormat {
        format: format!("unsupported point cloud format: {}", path.display()),
    })?;

    let mut reader = open(path)?;
    let cloud = match format {
        CloudFormat::Ply => PlyReader::parse_oriented_cloud(&mut reader)?,
        CloudFormat::Xyz => XyzReader::parse_oriented_cloud(reader)?,
    };

    info!(points = cloud.len(), path = %path.display(), "point cloud loaded");
    Ok(cloud)
}

/// Auto-detect format and write a mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        Some(MeshFormat::Ply) => PlyWriter::write_mesh(mesh, path)?,
        Some(MeshFormat::Obj) => ObjWriter::write_mesh(mesh, path)?,
        None => {
            return Err(IoError::InvalidFormat {
                format: format!("unsupported mesh format: {}", path.display()),
            }
            .into())
        }
    }
    debug!(faces = mesh.face_count(), path = %path.display(), "mesh written");
    Ok(())
}
