//! Reconstruction parameters

use pivotmesh_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How much intermediate state the reconstruction reports.
///
/// Ordered, so callers can gate output with `level >= DebugLevel::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// Configuration for the Ball Pivoting Algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BpaConfig {
    /// Ball radius for reconstruction
    pub ball_radius: f64,
    /// Verbosity of debug snapshots and logging
    pub debug_level: DebugLevel,
    /// Run seed search with the data-parallel strategy
    #[serde(rename = "useGPU", alias = "useGpu")]
    pub use_gpu: bool,
    /// Emit the pivoting ball with debug snapshots
    pub draw_spheres: bool,
}

impl Default for BpaConfig {
    fn default() -> Self {
        Self {
            ball_radius: 0.1,
            debug_level: DebugLevel::None,
            use_gpu: false,
            draw_spheres: false,
        }
    }
}

impl BpaConfig {
    pub fn with_radius(ball_radius: f64) -> Self {
        Self {
            ball_radius,
            ..Default::default()
        }
    }

    pub fn with_parallel_seeds(mut self, enabled: bool) -> Self {
        self.use_gpu = enabled;
        self
    }

    pub fn with_debug_level(mut self, level: DebugLevel) -> Self {
        self.debug_level = level;
        self
    }

    /// Reject parameters the algorithm cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "ball radius must be a positive number, got {}",
                self.ball_radius
            )));
        }
        Ok(())
    }
}
