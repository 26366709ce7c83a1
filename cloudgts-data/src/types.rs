//! Core data types for point clouds and indexed meshes.
//!
//! Everything here is produced once by one pipeline stage and handed to the
//! next without being mutated.

use crate::error::{FormatError, Result};
use glam::DVec3;
use std::fmt;

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Position as parsed from the source.
    pub position: DVec3,
}

impl Point {
    /// Create a point from its three coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }
}

impl From<DVec3> for Point {
    fn from(position: DVec3) -> Self {
        Self { position }
    }
}

/// Formats as `x y z` using the shortest representation that parses back
/// to the same `f64`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x(), self.y(), self.z())
    }
}

/// An ordered sequence of points. Order defines the 1-based indices used in
/// the mesh output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Keep every `rate`-th point starting with the first. A rate of 0 or 1
    /// keeps everything.
    pub fn subsample(self, rate: usize) -> Self {
        if rate <= 1 {
            return self;
        }
        Self {
            points: self.points.into_iter().step_by(rate).collect(),
        }
    }
}

impl From<Vec<Point>> for PointCloud {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One triangulation cell: three distinct 0-based indices into the
/// triangulated point slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }
}

/// A pair of 1-based point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Three 1-based indices into the edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub edges: [usize; 3],
}

impl Face {
    pub fn new(e0: usize, e1: usize, e2: usize) -> Self {
        Self {
            edges: [e0, e1, e2],
        }
    }
}

/// Header counts of a GTS mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    pub points: usize,
    pub edges: usize,
    pub faces: usize,
}

impl fmt::Display for MeshHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.points, self.edges, self.faces)
    }
}

/// Points plus the edge and face topology derived from a triangulation.
///
/// Header counts are always taken from the sequence lengths, so they cannot
/// drift from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    points: PointCloud,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(points: PointCloud, edges: Vec<Edge>, faces: Vec<Face>) -> Self {
        Self {
            points,
            edges,
            faces,
        }
    }

    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn header(&self) -> MeshHeader {
        MeshHeader {
            points: self.points.len(),
            edges: self.edges.len(),
            faces: self.faces.len(),
        }
    }

    /// Check that every edge references a point in `[1, point_count]` and
    /// every face references an edge in `[1, edge_count]`.
    pub fn validate(&self) -> Result<()> {
        let point_count = self.points.len();
        for (i, edge) in self.edges.iter().enumerate() {
            for index in [edge.a, edge.b] {
                if index == 0 || index > point_count {
                    return Err(FormatError::EdgeOutOfRange {
                        edge: i + 1,
                        point: index,
                        points: point_count,
                    }
                    .into());
                }
            }
        }

        let edge_count = self.edges.len();
        for (i, face) in self.faces.iter().enumerate() {
            for &index in &face.edges {
                if index == 0 || index > edge_count {
                    return Err(FormatError::FaceOutOfRange {
                        face: i + 1,
                        edge: index,
                        edges: edge_count,
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
