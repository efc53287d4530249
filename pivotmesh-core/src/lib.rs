//! Core data structures and traits for pivotmesh
//!
//! This crate provides the fundamental types shared by the reconstruction,
//! I/O and command-line crates: oriented points, point clouds, triangle
//! meshes, the neighbor-search trait and the common error type.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
