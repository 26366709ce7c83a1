//! PLY point cloud sources.

use crate::error::{Error, Result};
use crate::types::{Point, PointCloud};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, info, warn};

// Only the vertex element matters; faces are parsed so PLY meshes load too
#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct PlyFace {
    vertex_indices: Vec<i32>,
}

#[derive(Deserialize, Debug)]
struct PlyFile {
    #[serde(rename = "vertex")]
    vertex: Vec<HashMap<String, JsonValue>>,
    #[serde(default, rename = "face")]
    face: Vec<PlyFace>,
}

/// Load vertex positions from a PLY source, keeping every
/// `subsample_rate`-th vertex (0 keeps all of them).
#[tracing::instrument(skip_all, fields(subsample_rate = subsample_rate))]
pub fn load_points_ply<R: BufRead>(reader: R, subsample_rate: usize) -> Result<PointCloud> {
    let ply_data: PlyFile = serde_ply::from_reader(reader).map_err(|e| {
        warn!("Failed to parse PLY file: {}", e);
        Error::Ply(e.to_string())
    })?;

    debug!(
        "PLY parsed: {} vertices, {} faces (faces ignored)",
        ply_data.vertex.len(),
        ply_data.face.len()
    );

    fn get_f64(prop: Option<&JsonValue>) -> Option<f64> {
        prop.and_then(JsonValue::as_f64)
    }

    let mut points = Vec::with_capacity(ply_data.vertex.len());
    for (i, vertex) in ply_data.vertex.iter().enumerate() {
        let coord = |name: &str| {
            get_f64(vertex.get(name))
                .ok_or_else(|| Error::Ply(format!("Missing '{}' at vertex {}", name, i)))
        };
        points.push(Point::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let cloud = PointCloud::new(points).subsample(subsample_rate);
    info!("Points loaded: {}", cloud.len());
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRIANGLE_PLY: &str = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0.5
0 1 1
3 0 1 2
";

    #[test]
    fn test_load_ascii_ply_vertices() {
        let cloud = load_points_ply(Cursor::new(TRIANGLE_PLY), 0).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.points()[1], Point::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_ply_subsampling() {
        let cloud = load_points_ply(Cursor::new(TRIANGLE_PLY), 2).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points()[1], Point::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_garbage_is_ply_error() {
        let result = load_points_ply(Cursor::new("not a ply file\n"), 0);
        assert!(matches!(result, Err(Error::Ply(_))));
    }
}
