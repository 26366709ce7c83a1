//! Triangulation and topology composed into a single mesh build step.

use crate::config::MeshConfig;
use crate::error::Result;
use crate::topology::derive_topology_with;
use crate::triangulation::triangulate_on;
use crate::types::{Mesh, PointCloud};
use tracing::info;

/// Build a mesh with the default configuration.
pub fn build_mesh(cloud: PointCloud) -> Result<Mesh> {
    build_mesh_with(cloud, &MeshConfig::default())
}

/// Triangulate `cloud` and derive its edge and face topology.
///
/// With `exclude_last_point` set, the final point is kept in the mesh but
/// not handed to the triangulator, so it is never referenced by an edge.
#[tracing::instrument(skip_all, fields(points = cloud.len()))]
pub fn build_mesh_with(cloud: PointCloud, config: &MeshConfig) -> Result<Mesh> {
    let points = cloud.points();
    let triangulated = if config.exclude_last_point {
        &points[..points.len().saturating_sub(1)]
    } else {
        points
    };

    let triangles = triangulate_on(triangulated, config.projection)?;
    info!("Triangulation complete");

    let (edges, faces) = derive_topology_with(&triangles, config.edge_mode);
    Ok(Mesh::new(cloud, edges, faces))
}
