//! Pipeline configuration with builder pattern.

use crate::topology::EdgeMode;
use crate::triangulation::ProjectionPlane;

/// Controls how a point cloud is turned into a mesh.
///
/// The defaults reproduce the classic xyz-to-gts conversion: XY projection,
/// the last point left out of the triangulation, and one edge triple per
/// triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshConfig {
    pub projection: ProjectionPlane,
    /// Triangulate `points[..n-1]` while still writing all `n` points.
    pub exclude_last_point: bool,
    pub edge_mode: EdgeMode,
}

impl MeshConfig {
    pub fn new() -> Self {
        Self {
            projection: ProjectionPlane::XY,
            exclude_last_point: true,
            edge_mode: EdgeMode::PerTriangle,
        }
    }

    /// Set the projection plane.
    pub fn with_projection(mut self, projection: ProjectionPlane) -> Self {
        self.projection = projection;
        self
    }

    /// Choose whether the final point is left out of the triangulation.
    pub fn with_exclude_last_point(mut self, exclude: bool) -> Self {
        self.exclude_last_point = exclude;
        self
    }

    /// Set the edge generation mode.
    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self::new()
    }
}
