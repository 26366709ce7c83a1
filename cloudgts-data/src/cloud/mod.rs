//! Point cloud loading from XYZ text and PLY sources.

mod ply;
mod xyz;

pub use ply::load_points_ply;
pub use xyz::load_points;

use crate::error::{Error, Result};
use crate::types::PointCloud;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Point cloud file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCloudFormat {
    /// Whitespace-separated coordinates, 3 or 6 per line.
    Xyz,
    /// Stanford PLY, vertex positions only.
    Ply,
}

impl PointCloudFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xyz" | "txt" | "pts" => Some(Self::Xyz),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Detect the format from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Load a point cloud file, picking the parser from its extension.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_points_file<P: AsRef<Path>>(path: P, subsample_rate: usize) -> Result<PointCloud> {
    let path = path.as_ref();
    let format = PointCloudFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    })?;

    debug!("Loading {:?} point cloud from: {}", format, path.display());
    let reader = BufReader::new(File::open(path)?);

    match format {
        PointCloudFormat::Xyz => load_points(reader, subsample_rate),
        PointCloudFormat::Ply => load_points_ply(reader, subsample_rate),
    }
}
