//! PLY format support

use crate::error::{IoError, IoResult};
use pivotmesh_core::{NormalPoint3f, NormalPointCloud3f, Point3f, TriangleMesh, Vector3f};
use ply_rs::{
    parser::Parser,
    ply::{Addable, DefaultElement, ElementDef, Ply, Property, PropertyDef, PropertyType, ScalarType},
    writer::Writer,
};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

pub struct PlyReader;
pub struct PlyWriter;

impl PlyReader {
    /// Read the `vertex` element of a PLY stream as an oriented cloud.
    ///
    /// Every vertex needs `x`, `y`, `z`, `nx`, `ny` and `nz`; normals are
    /// normalized.
    pub fn parse_oriented_cloud<R: BufRead>(reader: &mut R) -> IoResult<NormalPointCloud3f> {
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(reader).map_err(|e| IoError::Malformed {
            message: format!("PLY parse error: {}", e),
        })?;

        let has_normals = ply
            .header
            .elements
            .get("vertex")
            .is_some_and(|element| ["nx", "ny", "nz"].iter().all(|p| element.properties.contains_key(*p)));
        let vertices = ply.payload.get("vertex").map(Vec::as_slice).unwrap_or_default();
        if vertices.is_empty() {
            return Err(IoError::Empty);
        }
        if !has_normals {
            return Err(IoError::MissingNormals);
        }

        let mut cloud = NormalPointCloud3f::new();
        for (index, vertex) in vertices.iter().enumerate() {
            let position = Point3f::new(
                extract_property_value(vertex, "x")?,
                extract_property_value(vertex, "y")?,
                extract_property_value(vertex, "z")?,
            );
            let normal = Vector3f::new(
                extract_property_value(vertex, "nx")?,
                extract_property_value(vertex, "ny")?,
                extract_property_value(vertex, "nz")?,
            );
            let normal = normal
                .try_normalize(f32::EPSILON)
                .ok_or(IoError::InvalidNormal { index })?;
            cloud.push(NormalPoint3f::new(position, normal));
        }

        Ok(cloud)
    }
}

impl PlyWriter {
    /// Write a triangle mesh, with vertex normals when it has them
    pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_elements(&mut writer, &mesh.vertices, mesh.normals.as_deref(), &mesh.faces, &[])
    }

    /// Write an oriented cloud as bare vertices, optionally with normals
    pub fn write_cloud<P: AsRef<Path>>(cloud: &NormalPointCloud3f, include_normals: bool, path: P) -> IoResult<()> {
        let normals = include_normals.then(|| cloud.normals());
        let mut writer = BufWriter::new(File::create(path)?);
        write_elements(&mut writer, &cloud.positions(), normals.as_deref(), &[], &[])
    }

    /// Write two vertices joined by a PLY `edge` element
    pub fn write_segment<P: AsRef<Path>>(from: Point3f, to: Point3f, path: P) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_elements(&mut writer, &[from, to], None, &[], &[[0, 1]])
    }
}

fn float_property(name: &str) -> PropertyDef {
    PropertyDef::new(name.to_string(), PropertyType::Scalar(ScalarType::Float))
}

fn write_elements<W: Write>(
    writer: &mut W,
    vertices: &[Point3f],
    normals: Option<&[Vector3f]>,
    faces: &[[usize; 3]],
    edges: &[[usize; 2]],
) -> IoResult<()> {
    let mut ply = Ply::<DefaultElement>::new();

    // Define vertex element
    let mut vertex_element = ElementDef::new("vertex".to_string());
    vertex_element.count = vertices.len();
    for name in ["x", "y", "z"] {
        vertex_element.properties.add(float_property(name));
    }
    if normals.is_some() {
        for name in ["nx", "ny", "nz"] {
            vertex_element.properties.add(float_property(name));
        }
    }
    ply.header.elements.add(vertex_element);

    if !faces.is_empty() {
        let mut face_element = ElementDef::new("face".to_string());
        face_element.count = faces.len();
        face_element.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::Int),
        ));
        ply.header.elements.add(face_element);
    }

    if !edges.is_empty() {
        let mut edge_element = ElementDef::new("edge".to_string());
        edge_element.count = edges.len();
        for name in ["vertex1", "vertex2"] {
            edge_element
                .properties
                .add(PropertyDef::new(name.to_string(), PropertyType::Scalar(ScalarType::Int)));
        }
        ply.header.elements.add(edge_element);
    }

    // Add vertex data
    let mut vertex_payload = Vec::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Float(vertex.x));
        element.insert("y".to_string(), Property::Float(vertex.y));
        element.insert("z".to_string(), Property::Float(vertex.z));

        if let Some(normals) = normals {
            let normal = normals.get(i).copied().unwrap_or_else(Vector3f::zeros);
            element.insert("nx".to_string(), Property::Float(normal.x));
            element.insert("ny".to_string(), Property::Float(normal.y));
            element.insert("nz".to_string(), Property::Float(normal.z));
        }
        vertex_payload.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_payload);

    if !faces.is_empty() {
        let face_payload = faces
            .iter()
            .map(|face| {
                let mut element = DefaultElement::new();
                let indices = face.iter().map(|&v| v as i32).collect();
                element.insert("vertex_indices".to_string(), Property::ListInt(indices));
                element
            })
            .collect();
        ply.payload.insert("face".to_string(), face_payload);
    }

    if !edges.is_empty() {
        let edge_payload = edges
            .iter()
            .map(|&[a, b]| {
                let mut element = DefaultElement::new();
                element.insert("vertex1".to_string(), Property::Int(a as i32));
                element.insert("vertex2".to_string(), Property::Int(b as i32));
                element
            })
            .collect();
        ply.payload.insert("edge".to_string(), edge_payload);
    }

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| IoError::WriteError {
            message: format!("PLY write failed: {}", e),
        })?;
    writer.flush()?;

    Ok(())
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> IoResult<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        _ => Err(IoError::Malformed {
            message: format!("Property '{}' not found or invalid type", name),
        }),
    }
}
