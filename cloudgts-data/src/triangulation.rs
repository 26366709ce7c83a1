//! Delaunay triangulation for point clouds.
//!
//! Points are projected onto a coordinate plane and triangulated in 2D with
//! delaunator. The dropped coordinate plays no part in connectivity.

use crate::error::{Result, TriangulationError};
use crate::types::{Point, Triangle};
use glam::DVec3;
use tracing::{debug, info, warn};

/// Plane the points are projected onto before triangulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionPlane {
    /// Drop z.
    #[default]
    XY,
    /// Drop y.
    XZ,
    /// Drop x.
    YZ,
    /// Pick the plane with the largest spread, see [`best_projection_plane`].
    Auto,
}

impl ProjectionPlane {
    /// Resolve `Auto` against a concrete point set.
    pub fn resolve(self, points: &[Point]) -> ProjectionPlane {
        match self {
            ProjectionPlane::Auto => best_projection_plane(points),
            plane => plane,
        }
    }

    fn project(self, p: DVec3) -> delaunator::Point {
        let (x, y) = match self {
            ProjectionPlane::XY | ProjectionPlane::Auto => (p.x, p.y),
            ProjectionPlane::XZ => (p.x, p.z),
            ProjectionPlane::YZ => (p.y, p.z),
        };
        delaunator::Point { x, y }
    }
}

/// Analyze a point cloud and return the projection plane that avoids its
/// smallest extent. Never returns `Auto`.
pub fn best_projection_plane(points: &[Point]) -> ProjectionPlane {
    if points.is_empty() {
        return ProjectionPlane::XY;
    }

    let mut min = DVec3::splat(f64::MAX);
    let mut max = DVec3::splat(f64::MIN);

    for p in points {
        min = min.min(p.position);
        max = max.max(p.position);
    }

    let extent = max - min;

    if extent.z <= extent.x && extent.z <= extent.y {
        ProjectionPlane::XY
    } else if extent.y <= extent.x && extent.y <= extent.z {
        ProjectionPlane::XZ
    } else {
        ProjectionPlane::YZ
    }
}

/// Triangulate points projected onto the XY plane.
///
/// Returns triangles indexing into `points` (0-based).
pub fn triangulate(points: &[Point]) -> Result<Vec<Triangle>> {
    triangulate_on(points, ProjectionPlane::XY)
}

/// Triangulate points projected onto `plane`.
///
/// Fails when fewer than 3 points are given or when no triangle can be
/// formed because every point is collinear or coincident in the projection.
pub fn triangulate_on(points: &[Point], plane: ProjectionPlane) -> Result<Vec<Triangle>> {
    if points.len() < 3 {
        warn!("Not enough points for triangulation (need at least 3)");
        return Err(TriangulationError::TooFewPoints {
            found: points.len(),
        }
        .into());
    }

    let plane = plane.resolve(points);
    debug!("Using projection plane: {:?}", plane);

    let projected: Vec<delaunator::Point> =
        points.iter().map(|p| plane.project(p.position)).collect();

    let result = delaunator::triangulate(&projected);

    if result.triangles.is_empty() {
        warn!(
            "No triangles from {} points, input is degenerate in the {:?} plane",
            points.len(),
            plane
        );
        return Err(TriangulationError::Degenerate {
            points: points.len(),
        }
        .into());
    }

    let triangles: Vec<Triangle> = result
        .triangles
        .chunks_exact(3)
        .map(|chunk| Triangle::new(chunk[0], chunk[1], chunk[2]))
        .collect();

    info!(
        "Triangulated {} points into {} triangles (plane: {:?})",
        points.len(),
        triangles.len(),
        plane
    );

    Ok(triangles)
}
