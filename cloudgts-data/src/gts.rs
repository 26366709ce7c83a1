//! GTS mesh text encoding and point extraction.
//!
//! Layout:
//!
//! ```text
//! <points> <edges> <faces>
//! x y z          one line per point
//! a b            one line per edge, 1-based point indices
//! e1 e2 e3       one line per face, 1-based edge indices
//! ```

use crate::error::{FormatError, Result};
use crate::types::Mesh;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Borrowed view of a mesh that formats as GTS text.
pub struct Gts<'a>(pub &'a Mesh);

impl fmt::Display for Gts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.0;
        writeln!(f, "{}", mesh.header())?;
        for point in mesh.points() {
            writeln!(f, "{}", point)?;
        }
        for edge in mesh.edges() {
            writeln!(f, "{} {}", edge.a, edge.b)?;
        }
        for face in mesh.faces() {
            let [a, b, c] = face.edges;
            writeln!(f, "{} {} {}", a, b, c)?;
        }
        Ok(())
    }
}

/// Write `mesh` as GTS text to `writer`.
pub fn write_mesh<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    write!(writer, "{}", Gts(mesh))?;
    writer.flush()?;
    Ok(())
}

/// Write `mesh` to a GTS file and return its path.
///
/// The text is rendered before the file is created. If writing fails the
/// file is removed, so a failed call never leaves a partial mesh behind.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_mesh_file<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    info!("Formatting mesh data...");
    let text = Gts(mesh).to_string();

    info!("Writing to GTS file...");
    if let Err(e) = fs::write(path, text) {
        warn!("Failed to write {}: {}", path.display(), e);
        if let Err(cleanup) = fs::remove_file(path) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Could not remove partial mesh {}: {}",
                    path.display(),
                    cleanup
                );
            }
        }
        return Err(e.into());
    }

    debug!("Wrote mesh header {}", mesh.header());
    Ok(path.to_path_buf())
}

/// Point lines copied out of a GTS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Point lines byte-for-byte as they appeared, terminators included.
    pub bytes: Vec<u8>,
    /// Point count declared by the header.
    pub expected: usize,
    /// Point lines actually present.
    pub copied: usize,
}

impl Extraction {
    /// Whether every point declared by the header was present.
    pub fn is_complete(&self) -> bool {
        self.copied == self.expected
    }

    /// The copied lines as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Turn a short extraction into [`FormatError::Truncated`].
    pub fn check(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(FormatError::Truncated {
                expected: self.expected,
                found: self.copied,
                partial: None,
            }
            .into())
        }
    }
}

/// Copy the point block out of GTS text.
///
/// The first token of the first line is the point count; that many
/// following lines are copied verbatim and the rest of the source is
/// ignored. A source that ends early yields an incomplete [`Extraction`]
/// holding whatever lines were available.
pub fn extract_points<R: BufRead>(mut reader: R) -> Result<Extraction> {
    let mut raw_header = Vec::new();
    if reader.read_until(b'\n', &mut raw_header)? == 0 {
        return Err(FormatError::MissingHeader.into());
    }
    let header = String::from_utf8_lossy(&raw_header);

    let expected = header
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| FormatError::InvalidHeader {
            line: header.trim_end().to_string(),
        })?;

    let mut bytes = Vec::new();
    let mut copied = 0;
    while copied < expected {
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        copied += 1;
    }

    if copied < expected {
        warn!(
            "Mesh ended after {} of {} declared points",
            copied, expected
        );
    }

    Ok(Extraction {
        bytes,
        expected,
        copied,
    })
}

/// Extract the point block of the GTS file at `mesh_path` into `out_path`.
///
/// If the mesh is truncated, the available lines go to `<out_path>.partial`
/// instead, any existing `out_path` is removed, and
/// [`FormatError::Truncated`] names the partial file.
#[tracing::instrument(skip_all, fields(mesh = %mesh_path.as_ref().display()))]
pub fn extract_points_file<P: AsRef<Path>, Q: AsRef<Path>>(
    mesh_path: P,
    out_path: Q,
) -> Result<Extraction> {
    let out_path = out_path.as_ref();
    let extraction = extract_points(BufReader::new(File::open(mesh_path)?))?;

    if extraction.is_complete() {
        fs::write(out_path, &extraction.bytes)?;
        info!(
            "Extracted {} points to {}",
            extraction.copied,
            out_path.display()
        );
        return Ok(extraction);
    }

    // A complete-looking output from an earlier run must not survive
    match fs::remove_file(out_path) {
        Ok(()) => warn!("Removed stale {}", out_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let partial = partial_path(out_path);
    fs::write(&partial, &extraction.bytes)?;
    warn!(
        "Incomplete extraction written to {}",
        partial.display()
    );

    Err(FormatError::Truncated {
        expected: extraction.expected,
        found: extraction.copied,
        partial: Some(partial),
    }
    .into())
}

/// `out.xyz` -> `out.xyz.partial`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Edge, Face, Point, PointCloud};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn tiny_mesh() -> Mesh {
        Mesh::new(
            PointCloud::new(vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.5, 0.0, -2.0),
                Point::new(0.0, 0.125, 3.0),
            ]),
            vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)],
            vec![Face::new(1, 2, 3)],
        )
    }

    #[test]
    fn test_write_layout() {
        let mut out = Vec::new();
        write_mesh(&tiny_mesh(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3 3 1\n0 0 0\n1.5 0 -2\n0 0.125 3\n1 2\n2 3\n3 1\n1 2 3\n"
        );
    }

    #[test]
    fn test_extract_stops_at_point_count() {
        let text = Gts(&tiny_mesh()).to_string();
        let extraction = extract_points(Cursor::new(text)).unwrap();
        assert!(extraction.is_complete());
        assert_eq!(extraction.as_str(), Some("0 0 0\n1.5 0 -2\n0 0.125 3\n"));
    }

    #[test]
    fn test_extract_is_verbatim() {
        let source = "2 0 0\n  1.000  2.0\t3\r\n4 5 6\n1 2\n";
        let extraction = extract_points(Cursor::new(source)).unwrap();
        assert_eq!(extraction.bytes, b"  1.000  2.0\t3\r\n4 5 6\n");
        assert_eq!(extraction.copied, 2);
    }

    #[test]
    fn test_extract_truncated_returns_available_lines() {
        let extraction = extract_points(Cursor::new("3 3 1\n0 0 0\n1 1 1\n")).unwrap();
        assert!(!extraction.is_complete());
        assert_eq!(extraction.expected, 3);
        assert_eq!(extraction.as_str(), Some("0 0 0\n1 1 1\n"));

        let err = extraction.check().unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::Truncated {
                expected: 3,
                found: 2,
                partial: None
            })
        ));
    }

    #[test]
    fn test_extract_without_trailing_newline() {
        let extraction = extract_points(Cursor::new("1 0 0\n7 8 9")).unwrap();
        assert!(extraction.is_complete());
        assert_eq!(extraction.bytes, b"7 8 9");
    }

    #[test]
    fn test_extract_bad_header() {
        let err = extract_points(Cursor::new("points 3\n0 0 0\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::InvalidHeader { .. })
        ));

        let err = extract_points(Cursor::new("\n0 0 0\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_extract_empty_source() {
        let err = extract_points(Cursor::new("")).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::MissingHeader)));
    }

    #[test]
    fn test_extract_zero_points() {
        let extraction = extract_points(Cursor::new("0 0 0\n")).unwrap();
        assert!(extraction.is_complete());
        assert!(extraction.bytes.is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let mesh_path = dir.path().join("tiny.gts");
        let out_path = dir.path().join("tiny.xyz");

        let written = write_mesh_file(&tiny_mesh(), &mesh_path).unwrap();
        assert_eq!(written, mesh_path);

        let extraction = extract_points_file(&mesh_path, &out_path).unwrap();
        assert_eq!(extraction.copied, 3);
        assert_eq!(fs::read(&out_path).unwrap(), extraction.bytes);
    }

    #[test]
    fn test_truncated_file_goes_to_partial() {
        let dir = tempdir().unwrap();
        let mesh_path = dir.path().join("cut.gts");
        let out_path = dir.path().join("cut.xyz");
        fs::write(&mesh_path, "3 6 2\n0 0 0\n1 0 0\n").unwrap();

        let err = extract_points_file(&mesh_path, &out_path).unwrap_err();
        let partial = match err {
            Error::Format(FormatError::Truncated {
                expected: 3,
                found: 2,
                partial: Some(partial),
            }) => partial,
            other => panic!("unexpected error: {other:?}"),
        };

        assert!(!out_path.exists());
        assert_eq!(partial, dir.path().join("cut.xyz.partial"));
        assert_eq!(fs::read_to_string(partial).unwrap(), "0 0 0\n1 0 0\n");
    }

    #[test]
    fn test_extract_copies_non_utf8_bytes() {
        let source: &[u8] = b"2 0 0\n1 0 0\n\xff 1\n1 2\n";
        let extraction = extract_points(Cursor::new(source)).unwrap();
        assert!(extraction.is_complete());
        assert_eq!(extraction.bytes, b"1 0 0\n\xff 1\n");
        assert_eq!(extraction.as_str(), None);
    }

    #[test]
    fn test_truncated_file_removes_stale_output() {
        let dir = tempdir().unwrap();
        let mesh_path = dir.path().join("cut.gts");
        let out_path = dir.path().join("cut.xyz");
        fs::write(&out_path, "0 0 0\n1 0 0\n2 0 0\n").unwrap();
        fs::write(&mesh_path, "3 6 2\n0 0 0\n").unwrap();

        let result = extract_points_file(&mesh_path, &out_path);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::Truncated { found: 1, .. }))
        ));
        assert!(!out_path.exists());
        assert!(dir.path().join("cut.xyz.partial").exists());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.gts");
        let result = write_mesh_file(&tiny_mesh(), &path);
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
    }
}
