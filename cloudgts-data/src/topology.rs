//! Edge and face topology derived from a triangulation.
//!
//! Points are 1-based in the output, edges are 1-based when referenced by
//! faces.

use crate::types::{Edge, Face, Triangle};
use std::collections::HashMap;
use tracing::debug;

/// How edges are generated from triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Three fresh edges per triangle. Edges shared by neighbouring
    /// triangles appear twice.
    #[default]
    PerTriangle,
    /// Each undirected edge is emitted once and faces reuse it.
    Shared,
}

/// Derive edges and faces with the given mode.
pub fn derive_topology_with(triangles: &[Triangle], mode: EdgeMode) -> (Vec<Edge>, Vec<Face>) {
    match mode {
        EdgeMode::PerTriangle => derive_topology(triangles),
        EdgeMode::Shared => derive_shared_topology(triangles),
    }
}

/// Emit edges `(p1,p2) (p2,p3) (p3,p1)` for every triangle in order and one
/// face `(3i+1, 3i+2, 3i+3)` for the i-th triangle.
pub fn derive_topology(triangles: &[Triangle]) -> (Vec<Edge>, Vec<Face>) {
    let mut edges = Vec::with_capacity(triangles.len() * 3);
    for triangle in triangles {
        let [p1, p2, p3] = triangle.indices.map(|i| i + 1);
        edges.push(Edge::new(p1, p2));
        edges.push(Edge::new(p2, p3));
        edges.push(Edge::new(p3, p1));
    }

    let faces: Vec<Face> = (0..triangles.len())
        .map(|i| Face::new(3 * i + 1, 3 * i + 2, 3 * i + 3))
        .collect();

    debug!(
        "Derived {} edges and {} faces from {} triangles",
        edges.len(),
        faces.len(),
        triangles.len()
    );

    (edges, faces)
}

/// Like [`derive_topology`] but every undirected edge is stored once, in
/// the orientation it was first seen.
pub fn derive_shared_topology(triangles: &[Triangle]) -> (Vec<Edge>, Vec<Face>) {
    let mut edges = Vec::new();
    let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
    let mut faces = Vec::with_capacity(triangles.len());

    for triangle in triangles {
        let [p1, p2, p3] = triangle.indices.map(|i| i + 1);
        let mut edge_index = |a: usize, b: usize| {
            *lookup.entry((a.min(b), a.max(b))).or_insert_with(|| {
                edges.push(Edge::new(a, b));
                edges.len()
            })
        };
        let e1 = edge_index(p1, p2);
        let e2 = edge_index(p2, p3);
        let e3 = edge_index(p3, p1);
        faces.push(Face::new(e1, e2, e3));
    }

    debug!(
        "Derived {} shared edges and {} faces from {} triangles",
        edges.len(),
        faces.len(),
        triangles.len()
    );

    (edges, faces)
}
