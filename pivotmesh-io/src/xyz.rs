//! XYZ text point cloud support
//!
//! One point per line: `x y z nx ny nz`, separated by whitespace, commas,
//! tabs or semicolons. Lines starting with `#` and blank lines are skipped.
//! An optional header line names the columns, in which case they may come
//! in any order.

use crate::error::{IoError, IoResult};
use pivotmesh_core::{NormalPoint3f, NormalPointCloud3f, Point3f, Vector3f};
use std::io::BufRead;

/// Supported delimiters for XYZ files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Whitespace,
    Semicolon,
}

impl Delimiter {
    /// Detect delimiter from a line of text
    pub fn detect_from_line(line: &str) -> Self {
        if line.contains(',') {
            Delimiter::Comma
        } else if line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Whitespace
        }
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
            Delimiter::Semicolon => line.split(';').map(str::trim).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Column types that can be parsed from XYZ files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    X,
    Y,
    Z,
    NormalX,
    NormalY,
    NormalZ,
    Unknown,
}

impl ColumnType {
    /// Parse column type from header name
    pub fn from_header(header: &str) -> Self {
        match header.trim().to_lowercase().as_str() {
            "x" | "px" | "pos_x" | "position_x" => ColumnType::X,
            "y" | "py" | "pos_y" | "position_y" => ColumnType::Y,
            "z" | "pz" | "pos_z" | "position_z" => ColumnType::Z,
            "nx" | "normal_x" | "n_x" => ColumnType::NormalX,
            "ny" | "normal_y" | "n_y" => ColumnType::NormalY,
            "nz" | "normal_z" | "n_z" => ColumnType::NormalZ,
            _ => ColumnType::Unknown,
        }
    }
}

/// Where the six values of a point live in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    position: [usize; 3],
    normal: [usize; 3],
}

impl Layout {
    const DEFAULT: Layout = Layout {
        position: [0, 1, 2],
        normal: [3, 4, 5],
    };

    fn from_header(columns: &[ColumnType]) -> IoResult<Self> {
        let find = |wanted: ColumnType| columns.iter().position(|&c| c == wanted);
        let position = [ColumnType::X, ColumnType::Y, ColumnType::Z].map(find);
        let normal = [ColumnType::NormalX, ColumnType::NormalY, ColumnType::NormalZ].map(find);

        let [Some(x), Some(y), Some(z)] = position else {
            return Err(IoError::ParseError {
                line: 1,
                message: "header must name x, y and z columns".to_string(),
            });
        };
        let [Some(nx), Some(ny), Some(nz)] = normal else {
            return Err(IoError::MissingNormals);
        };
        Ok(Layout {
            position: [x, y, z],
            normal: [nx, ny, nz],
        })
    }

    fn width(&self) -> usize {
        self.position.iter().chain(&self.normal).max().map_or(0, |&i| i + 1)
    }
}

/// XYZ reader implementation
pub struct XyzReader;

impl XyzReader {
    /// Parse an oriented cloud, normalizing every normal.
    pub fn parse_oriented_cloud<R: BufRead>(reader: R) -> IoResult<NormalPointCloud3f> {
        let mut cloud = NormalPointCloud3f::new();
        let mut schema: Option<(Layout, Delimiter)> = None;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = number + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (layout, delimiter) = match schema {
                Some(found) => found,
                None => {
                    let delimiter = Delimiter::detect_from_line(trimmed);
                    let parts = delimiter.split(trimmed);
                    if is_header(&parts) {
                        let columns: Vec<ColumnType> = parts.iter().map(|p| ColumnType::from_header(p)).collect();
                        schema = Some((Layout::from_header(&columns)?, delimiter));
                        continue;
                    }
                    *schema.insert((Layout::DEFAULT, delimiter))
                }
            };

            let parts = delimiter.split(trimmed);
            if parts.len() < layout.width() {
                if parts.len() >= 3 && parts.len() < 6 {
                    return Err(IoError::MissingNormals);
                }
                return Err(IoError::ParseError {
                    line: line_no,
                    message: format!("expected {} columns, found {}", layout.width(), parts.len()),
                });
            }

            let value = |column: usize| -> IoResult<f32> {
                parts[column].parse::<f32>().map_err(|_| IoError::ParseError {
                    line: line_no,
                    message: format!("invalid number '{}'", parts[column]),
                })
            };
            let [x, y, z] = layout.position;
            let [nx, ny, nz] = layout.normal;
            let position = Point3f::new(value(x)?, value(y)?, value(z)?);
            let normal = Vector3f::new(value(nx)?, value(ny)?, value(nz)?);

            let normal = normal
                .try_normalize(f32::EPSILON)
                .ok_or(IoError::InvalidNormal { index: cloud.len() })?;
            cloud.push(NormalPoint3f::new(position, normal));
        }

        if cloud.is_empty() {
            return Err(IoError::Empty);
        }
        Ok(cloud)
    }
}

/// A line is a header when its first field is not a number
fn is_header(parts: &[&str]) -> bool {
    parts.first().is_some_and(|first| first.parse::<f32>().is_err())
}
