//! Reconstruction driver
//!
//! Owns the point store, the spatial index, the front and the growing mesh,
//! and runs the pivot loop: drain the front, look for a seed, repeat until
//! neither makes progress.

use crate::ball_pivoting::{Edge, Triangle};
use crate::config::BpaConfig;
use crate::front::Front;
use crate::observer::ReconstructionObserver;
use crate::pivoter::{PivotOutcome, Pivoter};
use crate::seed::{ParallelSeeder, SeedStrategy, SequentialSeeder};
use crate::spatial::SpatialIndex;
use crate::store::PointStore;
use pivotmesh_core::{Error, NormalPointCloud3f, Result, TriangleMesh};
use std::fmt;
use tracing::{debug, info};

/// Counters collected while reconstructing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionStats {
    /// Active edges handed to the pivoter
    pub edges_tested: usize,
    /// Pivots whose triangle joined the mesh
    pub pivots_accepted: usize,
    /// Pivots that left their edge on the boundary
    pub pivots_rejected: usize,
    /// Seed triangles, one per connected component
    pub seeds: usize,
    /// Seed searches run, including the final unsuccessful one
    pub seed_searches: usize,
    /// Points that ended up in at least one triangle
    pub used_points: usize,
    /// Edges left on the boundary
    pub boundary_edges: usize,
}

impl fmt::Display for ReconstructionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} edges tested, {} pivots accepted, {} rejected, {} seeds, {} points used, {} boundary edges",
            self.edges_tested,
            self.pivots_accepted,
            self.pivots_rejected,
            self.seeds,
            self.used_points,
            self.boundary_edges
        )
    }
}

/// Finished reconstruction
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub triangles: Vec<Triangle>,
    /// Edges that only one triangle borders, ordered by key
    pub boundary: Vec<Edge>,
    pub stats: ReconstructionStats,
}

impl Reconstruction {
    pub fn faces(&self) -> Vec<[usize; 3]> {
        self.triangles.iter().map(|triangle| triangle.vertices).collect()
    }

    /// Mesh over the positions and normals of `cloud`, which must be the
    /// cloud that was reconstructed.
    pub fn to_mesh(&self, cloud: &NormalPointCloud3f) -> TriangleMesh {
        TriangleMesh::from_oriented_cloud(cloud, self.faces())
    }
}

pub struct Reconstructor {
    config: BpaConfig,
    store: PointStore,
    index: SpatialIndex,
    front: Front,
    triangles: Vec<Triangle>,
    seeder: Box<dyn SeedStrategy>,
    stats: ReconstructionStats,
}

impl Reconstructor {
    /// Validate `config` and `cloud` and build the search structures.
    ///
    /// The seed strategy follows `config.use_gpu`.
    pub fn new(cloud: &NormalPointCloud3f, config: BpaConfig) -> Result<Self> {
        config.validate()?;
        if cloud.is_empty() {
            return Err(Error::Load("point cloud is empty".to_string()));
        }
        cloud.validate()?;

        let store = PointStore::new(cloud);
        let index = SpatialIndex::new(store.positions());
        let seeder: Box<dyn SeedStrategy> = if config.use_gpu {
            Box::new(ParallelSeeder::new())
        } else {
            Box::new(SequentialSeeder)
        };
        debug!(points = store.len(), radius = config.ball_radius, seeder = seeder.name(), "reconstructor ready");

        Ok(Self {
            config,
            store,
            index,
            front: Front::new(),
            triangles: Vec::new(),
            seeder,
            stats: ReconstructionStats::default(),
        })
    }

    /// Replace the seed strategy chosen from the configuration
    pub fn with_seed_strategy(mut self, seeder: Box<dyn SeedStrategy>) -> Self {
        self.seeder = seeder;
        self
    }

    pub fn config(&self) -> &BpaConfig {
        &self.config
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn front(&self) -> &Front {
        &self.front
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn stats(&self) -> ReconstructionStats {
        ReconstructionStats {
            used_points: self.store.used_count(),
            boundary_edges: self.front.boundary_count(),
            ..self.stats
        }
    }

    pub fn pivoter(&self) -> Pivoter<'_> {
        Pivoter::new(&self.store, &self.index, self.config.ball_radius)
    }

    /// Alternate between draining the front and seeding until no seed is
    /// left.
    pub fn run<O: ReconstructionObserver + ?Sized>(&mut self, observer: &mut O) {
        loop {
            self.drain_front(observer);
            if self.seed(observer).is_none() {
                break;
            }
        }

        let stats = self.stats();
        info!(triangles = self.triangles.len(), "reconstruction finished: {}", stats);
        observer.finished(&self.triangles);
    }

    /// Pivot active edges until the front has none left. Returns the number
    /// of triangles added.
    pub fn drain_front<O: ReconstructionObserver + ?Sized>(&mut self, observer: &mut O) -> usize {
        let before = self.triangles.len();

        while let Some(edge) = self.front.active_edge() {
            self.stats.edges_tested += 1;
            debug!(edge = %edge, "testing edge");
            observer.edge_tested(&edge);

            let outcome = self.pivoter().pivot(&edge);
            match outcome {
                PivotOutcome::Found { point, triangle } if self.can_join(&edge, point) => {
                    self.store.mark_used(triangle.vertices);
                    self.front.join_and_fix(&edge, point, &triangle);
                    self.triangles.push(triangle);
                    self.stats.pivots_accepted += 1;
                    debug!(edge = %edge, point, triangle = %triangle, "point added");
                    observer.point_added(point, &triangle, &self.triangles);
                }
                _ => {
                    self.front.set_inactive(&edge);
                    self.stats.pivots_rejected += 1;
                    debug!(edge = %edge, "boundary edge");
                    observer.boundary_marked(&edge, &self.triangles);
                }
            }
        }

        self.triangles.len() - before
    }

    /// Look for a seed and, if found, start a new component with it.
    pub fn seed<O: ReconstructionObserver + ?Sized>(&mut self, observer: &mut O) -> Option<Triangle> {
        self.stats.seed_searches += 1;
        info!(
            used = self.store.used_count(),
            total = self.store.len(),
            seeder = self.seeder.name(),
            "searching for seed"
        );

        let seed = self.seeder.find_seed(&self.pivoter())?;
        self.store.mark_used(seed.vertices);
        self.front.add_edges(&seed);
        self.triangles.push(seed);
        self.stats.seeds += 1;
        debug!(triangle = %seed, "seed found");
        observer.seed_found(&seed, &self.triangles);
        Some(seed)
    }

    /// A pivot result may join the mesh if its point is fresh or still on
    /// the front, and no new side would get a third face.
    fn can_join(&self, edge: &Edge, point: usize) -> bool {
        (!self.store.is_used(point) || self.front.in_front(point)) && self.front.accepts(edge, point)
    }

    pub fn into_reconstruction(self) -> Reconstruction {
        let stats = self.stats();
        Reconstruction {
            boundary: self.front.boundary_edges(),
            triangles: self.triangles,
            stats,
        }
    }
}
