//! OBJ format support (writing only)

use crate::error::IoResult;
use pivotmesh_core::TriangleMesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ObjWriter;

impl ObjWriter {
    pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Vertices, optional vertex normals, then 1-based faces
    pub fn write_to<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> IoResult<()> {
        writeln!(writer, "# OBJ file exported by pivotmesh")?;
        writeln!(writer, "# Vertices: {}", mesh.vertex_count())?;
        writeln!(writer, "# Faces: {}", mesh.face_count())?;

        for v in &mesh.vertices {
            writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }

        let has_normals = match &mesh.normals {
            Some(normals) => {
                for n in normals {
                    writeln!(writer, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
                }
                normals.len() == mesh.vertices.len()
            }
            None => false,
        };

        for face in &mesh.faces {
            let [i0, i1, i2] = face.map(|v| v + 1);
            if has_normals {
                writeln!(writer, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?;
            } else {
                writeln!(writer, "f {} {} {}", i0, i1, i2)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivotmesh_core::{Point3f, Vector3f};

    fn triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_faces_are_one_based() {
        let mut out = Vec::new();
        ObjWriter::write_to(&triangle(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("v 1.000000 0.000000 0.000000"));
        assert!(text.lines().any(|line| line == "f 1 2 3"));
        assert!(!text.contains("vn "));
    }

    #[test]
    fn test_normals_referenced_by_faces() {
        let mut mesh = triangle();
        mesh.normals = Some(vec![Vector3f::z(); 3]);
        let mut out = Vec::new();
        ObjWriter::write_to(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|line| line.starts_with("vn ")).count(), 3);
        assert!(text.lines().any(|line| line == "f 1//1 2//2 3//3"));
    }
}
