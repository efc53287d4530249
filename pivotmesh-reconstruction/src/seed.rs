//! Seed search strategies
//!
//! When the front runs dry the driver asks a [`SeedStrategy`] for a fresh
//! triangle. Both strategies return the same seed for the same state; they
//! only differ in how the candidate points are evaluated.

use crate::ball_pivoting::Triangle;
use crate::parallel::{self, ThreadPoolConfig};
use crate::pivoter::Pivoter;
use pivotmesh_core::Result;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::Arc;

/// Strategy used to find a seed triangle among the unused points
pub trait SeedStrategy: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// First valid seed in ascending point order, or `None` when the cloud
    /// holds no more seeds.
    fn find_seed(&self, pivoter: &Pivoter<'_>) -> Option<Triangle>;
}

/// Scans unused points one at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSeeder;

impl SeedStrategy for SequentialSeeder {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn find_seed(&self, pivoter: &Pivoter<'_>) -> Option<Triangle> {
        pivoter.find_seed()
    }
}

/// Evaluates unused points in parallel.
///
/// `find_map_first` keeps the result of the lowest candidate index, so the
/// seed is the one [`SequentialSeeder`] would have returned.
#[derive(Debug, Clone, Default)]
pub struct ParallelSeeder {
    pool: Option<Arc<ThreadPool>>,
}

impl ParallelSeeder {
    /// Seeder running on rayon's global pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeder running on a dedicated pool
    pub fn with_thread_pool(config: &ThreadPoolConfig) -> Result<Self> {
        Ok(Self {
            pool: Some(parallel::build_thread_pool(config)?),
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }
}

impl SeedStrategy for ParallelSeeder {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn find_seed(&self, pivoter: &Pivoter<'_>) -> Option<Triangle> {
        let candidates: Vec<usize> = pivoter.store().unused().collect();
        parallel::execute_parallel(self.pool.as_deref(), || {
            candidates
                .par_iter()
                .find_map_first(|&point| pivoter.seed_from(point))
        })
    }
}
