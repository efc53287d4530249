//! Error types for I/O operations

use pivotmesh_core::Error;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Malformed input: {message}")]
    Malformed { message: String },

    #[error("Point {index} has no usable normal")]
    InvalidNormal { index: usize },

    #[error("Input has no normals (expected nx, ny, nz)")]
    MissingNormals,

    #[error("Input contains no points")]
    Empty,

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IoResult<T> = std::result::Result<T, IoError>;

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io(e) => Error::Io(e),
            IoError::InvalidFormat { format } => Error::UnsupportedFormat(format),
            IoError::WriteError { message } => Error::InvalidData(message),
            other => Error::Load(other.to_string()),
        }
    }
}
