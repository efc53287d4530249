//! pivotmesh: reconstruct a triangle mesh from an oriented point cloud.
//!
//! Reads a cloud with per-point normals (PLY or XYZ), rolls a ball of the
//! configured radius over it and writes the resulting mesh.
//!
//! # Logging
//!
//! Progress goes to stderr. `-v` and `-vv` raise the verbosity, `-q`
//! silences everything but errors, and `RUST_LOG` overrides both:
//! - `RUST_LOG=pivotmesh_reconstruction=debug` - every pivot decision
//! - `RUST_LOG=pivotmesh_io=debug` - every file written
//!
//! # Example
//!
//! ```bash
//! pivotmesh bunny.ply --radius 0.002 -o bunny_mesh.ply
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pivotmesh_reconstruction::{DebugLevel, Reconstructor};

mod settings;
mod snapshots;

use snapshots::SnapshotObserver;

/// pivotmesh - Ball-pivoting surface reconstruction.
#[derive(Parser)]
#[command(name = "pivotmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input point cloud with normals (.ply, .xyz, .txt, .pts, .csv)
    input: PathBuf,

    /// Configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Ball radius, overrides the configuration file
    #[arg(long, short)]
    radius: Option<f64>,

    /// Output mesh path (.ply or .obj), defaults to <output-dir>/mesh.ply
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Directory for the mesh and debug snapshots, cleared before each run
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Suppress all non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over the -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn,pivotmesh=info,pivotmesh_io=info,pivotmesh_reconstruction=info",
            1 => "warn,pivotmesh=debug,pivotmesh_io=debug,pivotmesh_reconstruction=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_CONFIG_PATH));
    let config = settings::load(&config_path, cli.radius)?;

    let removed = pivotmesh_io::prepare_output_dir(&cli.output_dir)
        .with_context(|| format!("Failed to prepare output directory {:?}", cli.output_dir))?;
    if removed > 0 {
        info!(removed, dir = %cli.output_dir.display(), "cleaned output directory");
    }

    let start = Instant::now();

    info!("Loading file {}", cli.input.display());
    let cloud = pivotmesh_io::read_oriented_cloud(&cli.input)
        .with_context(|| format!("Failed to load point cloud from {:?}", cli.input))?;
    info!("Loaded {} points in cloud", cloud.len());

    info!("Building mesh with ball r={}", config.ball_radius);
    let mut observer = SnapshotObserver::new(&cloud, &cli.output_dir, &config);
    if config.debug_level > DebugLevel::None {
        info!(level = ?config.debug_level, dir = %cli.output_dir.display(), "writing debug snapshots");
    }
    let mut reconstructor = Reconstructor::new(&cloud, config)?;
    reconstructor.run(&mut observer);
    let reconstruction = reconstructor.into_reconstruction();

    let mesh = reconstruction.to_mesh(&cloud);
    let output = output_path(cli.output.as_deref(), &cli.output_dir);
    pivotmesh_io::write_mesh(&mesh, &output)
        .with_context(|| format!("Failed to write mesh to {:?}", output))?;
    info!(
        faces = mesh.face_count(),
        vertices = mesh.referenced_vertex_count(),
        boundary = reconstruction.boundary.len(),
        path = %output.display(),
        "mesh written"
    );

    info!("Finished in {:.5} [s]", start.elapsed().as_secs_f64());
    Ok(())
}

fn output_path(explicit: Option<&Path>, output_dir: &Path) -> PathBuf {
    explicit.map_or_else(|| output_dir.join("mesh.ply"), Path::to_path_buf)
}
