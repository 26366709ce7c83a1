//! Cloudgts Application
//!
//! Command line front end: converts XYZ/PLY point clouds to GTS meshes and
//! extracts the point block back out of GTS files.

mod app;

use app::{ExtractJob, LoggingConfig, MeshJob};
use clap::{Parser, Subcommand, ValueEnum};
use cloudgts_data::{EdgeMode, MeshConfig, ProjectionPlane};
use std::path::PathBuf;

/// Cloudgts - Point Cloud to GTS Mesh Conversion
#[derive(Parser, Debug)]
#[command(name = "cloudgts")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Triangulate a point cloud and write it as a GTS mesh
    Mesh {
        /// Point cloud file (.xyz, .txt, .pts or .ply)
        input: PathBuf,

        /// Output GTS file (defaults to the input name with a .gts extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep every n-th point (0 for none)
        #[arg(short, long, default_value_t = 0)]
        subsample: usize,

        /// Projection plane for triangulation
        #[arg(long, value_enum, default_value_t = Plane::Xy)]
        plane: Plane,

        /// Include the final point in the triangulation
        #[arg(long)]
        keep_last: bool,

        /// Emit each shared edge once instead of once per triangle
        #[arg(long)]
        shared_edges: bool,
    },

    /// Copy the point block of a GTS mesh into an XYZ file
    Extract {
        /// GTS mesh file
        mesh: PathBuf,

        /// Output XYZ file (defaults to the mesh name with a .xyz extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Plane {
    Xy,
    Xz,
    Yz,
    Auto,
}

impl From<Plane> for ProjectionPlane {
    fn from(plane: Plane) -> Self {
        match plane {
            Plane::Xy => ProjectionPlane::XY,
            Plane::Xz => ProjectionPlane::XZ,
            Plane::Yz => ProjectionPlane::YZ,
            Plane::Auto => ProjectionPlane::Auto,
        }
    }
}

fn main() {
    let args = Args::parse();

    app::init_logging(&LoggingConfig {
        level: args.log_level,
    });

    let result = match args.command {
        Command::Mesh {
            input,
            output,
            subsample,
            plane,
            keep_last,
            shared_edges,
        } => {
            let config = MeshConfig::new()
                .with_projection(plane.into())
                .with_exclude_last_point(!keep_last)
                .with_edge_mode(if shared_edges {
                    EdgeMode::Shared
                } else {
                    EdgeMode::PerTriangle
                });
            app::run_mesh(&MeshJob {
                input,
                output,
                subsample_rate: subsample,
                config,
            })
            .map(|path| println!("{}", path.display()))
        }
        Command::Extract { mesh, output } => {
            app::run_extract(&ExtractJob { mesh, output }).map(|path| println!("{}", path.display()))
        }
    };

    if let Err(e) = result {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
