//! # pivotmesh Reconstruction
//!
//! Ball-pivoting surface reconstruction for oriented point clouds.
//!
//! A ball of fixed radius is rolled over the cloud. Whenever it rests on
//! three points without containing any other, those points form a triangle;
//! rolling the ball over each new edge finds the next one. [`reconstruct`]
//! runs the whole algorithm, [`Reconstructor`] exposes the individual steps
//! and lifecycle events.

pub mod ball_pivoting;
pub mod config;
pub mod driver;
pub mod front;
pub mod geometry;
pub mod observer;
pub mod parallel;
pub mod pivoter;
pub mod seed;
pub mod spatial;
pub mod store;

// Re-export commonly used items
pub use ball_pivoting::*;
pub use config::*;
pub use driver::*;
pub use front::{EdgeState, Front};
pub use observer::*;
pub use parallel::ThreadPoolConfig;
pub use pivoter::*;
pub use seed::*;
pub use spatial::SpatialIndex;
pub use store::PointStore;
