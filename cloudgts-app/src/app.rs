//! Conversion jobs and logging setup.

use cloudgts_data::{
    MeshConfig, build_mesh_with, extract_points_file, load_points_file, write_mesh_file,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Data(#[from] cloudgts_data::Error),

    #[error("Refusing to overwrite input file: {0}")]
    OutputIsInput(PathBuf),
}

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

/// Install the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level)),
        )
        .with_target(false)
        .init();
}

/// A point cloud to GTS conversion.
pub struct MeshJob {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub subsample_rate: usize,
    pub config: MeshConfig,
}

/// A GTS to point cloud extraction.
pub struct ExtractJob {
    pub mesh: PathBuf,
    pub output: Option<PathBuf>,
}

/// Load, triangulate and write. Nothing is written unless loading and
/// meshing both succeed.
pub fn run_mesh(job: &MeshJob) -> Result<PathBuf, AppError> {
    let output = resolve_output(&job.input, job.output.as_deref(), "gts")?;
    info!("Meshing {} -> {}", job.input.display(), output.display());

    let cloud = load_points_file(&job.input, job.subsample_rate)?;
    let mesh = build_mesh_with(cloud, &job.config)?;
    Ok(write_mesh_file(&mesh, &output)?)
}

/// Extract the point block of a mesh into an XYZ file.
pub fn run_extract(job: &ExtractJob) -> Result<PathBuf, AppError> {
    let output = resolve_output(&job.mesh, job.output.as_deref(), "xyz")?;
    let extraction = extract_points_file(&job.mesh, &output)?;
    info!("Extracted {} points", extraction.copied);
    Ok(output)
}

fn resolve_output(input: &Path, output: Option<&Path>, extension: &str) -> Result<PathBuf, AppError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(extension));
    if output == input {
        return Err(AppError::OutputIsInput(output));
    }
    Ok(output)
}
