//! Cloudgts Data Crate
//!
//! Turns point clouds into GTS triangulated surface meshes and pulls the
//! point block back out of existing GTS files.
//!
//! The write path is `load_points` → `build_mesh` (Delaunay triangulation in
//! a projection plane, then edge/face topology) → `write_mesh`. The read-back
//! path is `extract_points`, which never triangulates.

pub mod cloud;
pub mod config;
pub mod error;
pub mod gts;
pub mod pipeline;
pub mod topology;
pub mod triangulation;
pub mod types;

pub use cloud::{PointCloudFormat, load_points, load_points_file, load_points_ply};
pub use config::MeshConfig;
pub use error::{Error, FormatError, ParseErrorKind, Result, TriangulationError};
pub use gts::{Extraction, Gts, extract_points, extract_points_file, write_mesh, write_mesh_file};
pub use pipeline::{build_mesh, build_mesh_with};
pub use topology::{EdgeMode, derive_topology, derive_topology_with};
pub use triangulation::{ProjectionPlane, best_projection_plane, triangulate, triangulate_on};
pub use types::{Edge, Face, Mesh, MeshHeader, Point, PointCloud, Triangle};
