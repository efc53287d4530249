//! Integration tests for pivotmesh-reconstruction
//!
//! These tests run whole reconstructions and check the properties every
//! ball-pivoting mesh must have, on small scenarios and on denser clouds.

use pivotmesh_core::{NormalPoint3f, NormalPointCloud3f, Point3f, Vector3f};
use pivotmesh_reconstruction::*;
use std::collections::{HashMap, HashSet};

fn oriented(x: f64, y: f64, z: f64, normal: Vector3f) -> NormalPoint3f {
    NormalPoint3f::new(Point3f::new(x as f32, y as f32, z as f32), normal)
}

/// Points on the unit sphere along a golden-angle spiral, normals pointing out
fn create_sphere_with_normals(num_points: usize) -> NormalPointCloud3f {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());

    (0..num_points)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / num_points as f64;
            let ring = (1.0 - z * z).sqrt();
            let theta = golden_angle * i as f64;
            let (x, y) = (ring * theta.cos(), ring * theta.sin());
            oriented(x, y, z, Vector3f::new(x as f32, y as f32, z as f32))
        })
        .collect()
}

/// Slightly jittered `n x n` grid in the z = 0 plane, normals up
fn create_jittered_grid(n: usize, spacing: f64) -> NormalPointCloud3f {
    (0..n * n)
        .map(|i| {
            let x = (i % n) as f64 * spacing + 0.2 * spacing * (i as f64 * 1.7).sin();
            let y = (i / n) as f64 * spacing + 0.2 * spacing * (i as f64 * 2.3).cos();
            oriented(x, y, 0.0, Vector3f::z())
        })
        .collect()
}

fn create_square(side: f64) -> NormalPointCloud3f {
    [(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)]
        .iter()
        .map(|&(x, y)| oriented(x, y, 0.0, Vector3f::z()))
        .collect()
}

fn run(cloud: &NormalPointCloud3f, config: BpaConfig) -> (Reconstructor, Reconstruction) {
    let mut reconstructor = Reconstructor::new(cloud, config).unwrap();
    reconstructor.run(&mut NoopObserver);
    let reconstruction = Reconstruction {
        triangles: reconstructor.triangles().to_vec(),
        boundary: reconstructor.front().boundary_edges(),
        stats: reconstructor.stats(),
    };
    (reconstructor, reconstruction)
}

fn side_counts(triangles: &[Triangle]) -> HashMap<EdgeKey, usize> {
    let mut counts = HashMap::new();
    for triangle in triangles {
        for edge in triangle.edges() {
            *counts.entry(edge.key()).or_insert(0) += 1;
        }
    }
    counts
}

fn assert_empty_balls(cloud: &NormalPointCloud3f, triangles: &[Triangle], radius: f64) {
    let limit = radius * (1.0 - 1e-5);
    for triangle in triangles {
        for (i, point) in cloud.iter().enumerate() {
            if triangle.contains(i) {
                continue;
            }
            let distance = (point.position_f64() - triangle.ball_center).norm();
            assert!(
                distance >= limit,
                "point {} lies inside the ball of {} ({} < {})",
                i,
                triangle,
                distance,
                radius
            );
        }
    }
}

fn assert_edge_arity(reconstructor: &Reconstructor) {
    for (key, count) in side_counts(reconstructor.triangles()) {
        assert!(count <= 2, "edge {:?} borders {} triangles", key, count);
        if count == 2 {
            assert_eq!(
                reconstructor.front().edge_state(key.v1, key.v2),
                Some(EdgeState::Interior),
                "edge {:?} has two faces but is still in the front",
                key
            );
        }
    }
}

#[test]
fn test_square_gives_two_triangles() {
    let cloud = create_square(1.0);
    let (reconstructor, reconstruction) = run(&cloud, BpaConfig::with_radius(1.0));

    assert_eq!(reconstruction.faces(), vec![[0, 1, 2], [2, 3, 0]]);
    assert_eq!(reconstructor.front().edge_state(0, 2), Some(EdgeState::Interior));
    assert_eq!(reconstructor.front().active_count(), 0);

    let boundary: HashSet<EdgeKey> = reconstruction.boundary.iter().map(|edge| edge.key()).collect();
    let expected: HashSet<EdgeKey> = [(0, 1), (1, 2), (2, 3), (0, 3)]
        .iter()
        .map(|&(a, b)| EdgeKey::new(a, b))
        .collect();
    assert_eq!(boundary, expected);
}

#[test]
fn test_isolated_triangle_is_all_boundary() {
    let cloud: NormalPointCloud3f = [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (5.0, 5.0), (5.0, -5.0)]
        .iter()
        .map(|&(x, y)| oriented(x, y, 0.0, Vector3f::z()))
        .collect();

    let mut reconstructor = Reconstructor::new(&cloud, BpaConfig::with_radius(0.5)).unwrap();
    let seed = reconstructor.seed(&mut NoopObserver).unwrap();
    reconstructor.drain_front(&mut NoopObserver);

    for edge in seed.edges() {
        assert_eq!(
            reconstructor.front().edge_state(edge.source, edge.target),
            Some(EdgeState::Boundary)
        );
    }
    assert!(reconstructor.seed(&mut NoopObserver).is_none());
    assert_eq!(reconstructor.triangles().len(), 1);
}

#[test]
fn test_point_inside_ball_rejects_seed() {
    let cloud: NormalPointCloud3f = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.3, 0.3, 0.4),
    ]
    .iter()
    .map(|&(x, y, z)| oriented(x, y, z, Vector3f::z()))
    .collect();

    let reconstructor = Reconstructor::new(&cloud, BpaConfig::with_radius(1.0)).unwrap();
    let store = reconstructor.store();
    let center = geometry::ball_center(store.position(0), store.position(1), store.position(2), 1.0).unwrap();

    let pivoter = reconstructor.pivoter();
    assert!(!pivoter.is_empty_ball(&center, &[0, 1, 2, 3], [0, 1, 2]));
    let seed = pivoter.find_seed().unwrap();
    assert_ne!(seed.vertices, [0, 1, 2]);
}

#[test]
fn test_sphere_is_closed() {
    let cloud = create_sphere_with_normals(200);
    let (reconstructor, reconstruction) = run(&cloud, BpaConfig::with_radius(0.3));

    assert_empty_balls(&cloud, &reconstruction.triangles, 0.3);
    assert_edge_arity(&reconstructor);

    assert_eq!(reconstruction.stats.used_points, 200);
    assert_eq!(reconstruction.stats.boundary_edges, 0);
    // closed genus-0 surface: F = 2V - 4
    assert_eq!(reconstruction.triangles.len(), 396);
    assert!(side_counts(&reconstruction.triangles).values().all(|&count| count == 2));
}

#[test]
fn test_sphere_faces_point_outward() {
    let cloud = create_sphere_with_normals(200);
    let mesh = reconstruct(&cloud, &BpaConfig::with_radius(0.3)).unwrap();

    for (face, normal) in mesh.faces.iter().zip(mesh.calculate_face_normals()) {
        let centroid = face
            .iter()
            .fold(Vector3f::zeros(), |acc, &v| acc + mesh.vertices[v].coords)
            / 3.0;
        assert!(normal.dot(&centroid) > 0.0, "face {:?} points inward", face);
    }
}

#[test]
fn test_grid_is_a_disk() {
    let cloud = create_jittered_grid(8, 0.1);
    let (reconstructor, reconstruction) = run(&cloud, BpaConfig::with_radius(0.1));

    assert_empty_balls(&cloud, &reconstruction.triangles, 0.1);
    assert_edge_arity(&reconstructor);

    let stats = reconstruction.stats;
    assert_eq!(stats.used_points, 64);
    assert_eq!(stats.seeds, 1);
    // triangulated disk: F = 2V - 2 - B
    assert_eq!(reconstruction.triangles.len(), 2 * 64 - 2 - stats.boundary_edges);
}

#[test]
fn test_used_flags_never_clear() {
    let cloud = create_jittered_grid(6, 0.1);
    let mut reconstructor = Reconstructor::new(&cloud, BpaConfig::with_radius(0.1)).unwrap();
    let mut previous: Vec<bool> = vec![false; cloud.len()];

    loop {
        reconstructor.drain_front(&mut NoopObserver);
        let current: Vec<bool> = (0..cloud.len()).map(|i| reconstructor.store().is_used(i)).collect();
        assert!(previous.iter().zip(&current).all(|(&before, &after)| !before || after));
        previous = current;

        if reconstructor.seed(&mut NoopObserver).is_none() {
            break;
        }
    }

    let vertices: HashSet<usize> = reconstructor
        .triangles()
        .iter()
        .flat_map(|triangle| triangle.vertices)
        .collect();
    assert_eq!(vertices.len(), reconstructor.store().used_count());
}

#[test]
fn test_reconstruction_is_deterministic() {
    let cloud = create_sphere_with_normals(120);
    let (_, first) = run(&cloud, BpaConfig::with_radius(0.35));
    let (_, second) = run(&cloud, BpaConfig::with_radius(0.35));

    assert_eq!(first.triangles, second.triangles);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_parallel_seeder_matches_sequential() {
    let cloud = create_jittered_grid(8, 0.1);
    let (_, sequential) = run(&cloud, BpaConfig::with_radius(0.1));
    let (_, parallel) = run(&cloud, BpaConfig::with_radius(0.1).with_parallel_seeds(true));

    assert_eq!(parallel.triangles, sequential.triangles);

    let pool = ThreadPoolConfig::default().with_threads(2);
    let mut pooled = Reconstructor::new(&cloud, BpaConfig::with_radius(0.1))
        .unwrap()
        .with_seed_strategy(Box::new(ParallelSeeder::with_thread_pool(&pool).unwrap()));
    pooled.run(&mut NoopObserver);
    assert_eq!(pooled.triangles(), sequential.triangles.as_slice());
}

#[test]
fn test_disconnected_patches() {
    let mut cloud = create_square(0.1);
    for point in create_square(0.1).iter() {
        cloud.push(oriented(
            point.position.x as f64 + 3.0,
            point.position.y as f64,
            0.0,
            Vector3f::z(),
        ));
    }

    let (_, reconstruction) = run(&cloud, BpaConfig::with_radius(0.1));
    assert_eq!(reconstruction.stats.seeds, 2);
    assert_eq!(reconstruction.triangles.len(), 4);
    assert!(reconstruction.triangles[2..].iter().all(|t| t.vertices.iter().all(|&v| v >= 4)));
}

#[test]
fn test_mesh_conversion() {
    let cloud = create_square(1.0);
    let mesh = ball_pivoting(&cloud, 1.0).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.boundary_edge_count(), 4);
    let normals = mesh.normals.as_ref().unwrap();
    assert!(normals.iter().all(|n| (n - Vector3f::z()).norm() < 1e-6));
    assert_eq!(mesh.vertices[2], Point3f::new(1.0, 1.0, 0.0));
}
