//! Error types for loading, meshing and mesh file handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the cloud-to-mesh pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error at line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("PLY parse error: {0}")]
    Ply(String),

    #[error("Triangulation error: {0}")]
    Triangulation(#[from] TriangulationError),

    #[error("Mesh format error: {0}")]
    Format(#[from] FormatError),

    #[error("Unsupported point cloud format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What was wrong with a point cloud line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 3 or 6 values, found {found}")]
    TokenCount { found: usize },

    #[error("invalid number '{token}'")]
    InvalidNumber { token: String },
}

/// Geometrically unusable triangulation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulationError {
    #[error("need at least 3 points, got {found}")]
    TooFewPoints { found: usize },

    #[error("{points} points are collinear or coincident in the projection plane")]
    Degenerate { points: usize },
}

/// Malformed or incomplete GTS mesh input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("mesh source is empty")]
    MissingHeader,

    #[error("header has no leading point count: '{line}'")]
    InvalidHeader { line: String },

    #[error("edge {edge} references point {point}, mesh has {points} points")]
    EdgeOutOfRange {
        edge: usize,
        point: usize,
        points: usize,
    },

    #[error("face {face} references edge {edge}, mesh has {edges} edges")]
    FaceOutOfRange {
        face: usize,
        edge: usize,
        edges: usize,
    },

    #[error("header declares {expected} points but only {found} are present")]
    Truncated {
        expected: usize,
        found: usize,
        /// Where the available lines were written, when extracting to a file.
        partial: Option<PathBuf>,
    },
}

impl Error {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Error::Parse { line, kind }
    }
}
