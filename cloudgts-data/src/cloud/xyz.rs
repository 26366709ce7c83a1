//! Whitespace-separated XYZ text point clouds.

use crate::error::{Error, ParseErrorKind, Result};
use crate::types::{Point, PointCloud};
use std::io::BufRead;
use tracing::{debug, info};

/// Load points from XYZ text, keeping every `subsample_rate`-th point
/// (0 keeps all of them).
///
/// Each line holds 3 tokens (one point) or 6 tokens (two points, in order).
/// Blank lines and lines starting with `#` or `//` are skipped. Line numbers
/// in errors are 1-based.
#[tracing::instrument(skip_all, fields(subsample_rate = subsample_rate))]
pub fn load_points<R: BufRead>(reader: R, subsample_rate: usize) -> Result<PointCloud> {
    let mut points = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 3 && tokens.len() != 6 {
            return Err(Error::parse(
                line_number,
                ParseErrorKind::TokenCount {
                    found: tokens.len(),
                },
            ));
        }

        // A 6-token line packs two consecutive points
        for coords in tokens.chunks_exact(3) {
            points.push(parse_point(coords, line_number)?);
        }
    }

    let loaded = points.len();
    let cloud = PointCloud::new(points).subsample(subsample_rate);
    if subsample_rate > 1 {
        debug!(
            "Subsampled {} points down to {} (rate {})",
            loaded,
            cloud.len(),
            subsample_rate
        );
    }

    info!("Points loaded: {}", cloud.len());
    Ok(cloud)
}

fn parse_point(coords: &[&str], line: usize) -> Result<Point> {
    // `nan` and `inf` parse as f64 but are not coordinates
    let parse = |token: &str| {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Error::parse(
                    line,
                    ParseErrorKind::InvalidNumber {
                        token: token.to_string(),
                    },
                )
            })
    };

    Ok(Point::new(
        parse(coords[0])?,
        parse(coords[1])?,
        parse(coords[2])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str, rate: usize) -> Result<PointCloud> {
        load_points(Cursor::new(text), rate)
    }

    #[test]
    fn test_load_three_token_lines() {
        let cloud = load("0 0 0\n1 2 3\n-1.5 2.25 1e3\n", 0).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.points()[1], Point::new(1.0, 2.0, 3.0));
        assert_eq!(cloud.points()[2], Point::new(-1.5, 2.25, 1000.0));
    }

    #[test]
    fn test_six_token_line_splits_into_two_points() {
        let cloud = load("0 0 0 1 1 1\n", 0).unwrap();
        assert_eq!(
            cloud.points(),
            &[Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn test_mixed_line_widths_keep_order() {
        let cloud = load("1 1 1\n2 2 2 3 3 3\n4 4 4\n", 0).unwrap();
        let xs: Vec<f64> = cloud.iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_four_tokens_reports_line_number() {
        let err = load("0 0 0\n1 1 1\n1 2 3 4\n", 0).unwrap_err();
        match err {
            Error::Parse { line, kind } => {
                assert_eq!(line, 3);
                assert_eq!(kind, ParseErrorKind::TokenCount { found: 4 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_token() {
        let err = load("0 0 0\n1 abc 1\n", 0).unwrap_err();
        match err {
            Error::Parse { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(
                    kind,
                    ParseErrorKind::InvalidNumber {
                        token: "abc".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_token() {
        for (text, line, token) in [
            ("0 0 0\nnan 0 0\n", 2, "nan"),
            ("0 0 0\n1 0 0\n0 1 NaN\n", 3, "NaN"),
            ("inf 1 1\n", 1, "inf"),
            ("0 0 0 1 -infinity 1\n", 1, "-infinity"),
        ] {
            match load(text, 0).unwrap_err() {
                Error::Parse { line: at, kind } => {
                    assert_eq!(at, line);
                    assert_eq!(
                        kind,
                        ParseErrorKind::InvalidNumber {
                            token: token.to_string()
                        }
                    );
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let cloud = load("# header\n\n// note\n0 0 0\n   \n1 1 1\n", 0).unwrap();
        assert_eq!(cloud.len(), 2);
    }

    #[test]
    fn test_line_numbers_count_skipped_lines() {
        let err = load("# header\n\n0 0\n", 0).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_subsampling_matches_stride() {
        let text: String = (0..10).map(|i| format!("{i} 0 0\n")).collect();
        for k in 1..=11 {
            let cloud = load(&text, k).unwrap();
            assert_eq!(cloud.len(), 10usize.div_ceil(k));
            for (j, p) in cloud.iter().enumerate() {
                assert_eq!(p.x(), (j * k) as f64);
            }
        }
    }

    #[test]
    fn test_subsampling_after_splitting_pairs() {
        // Stride applies to the flattened point sequence
        let cloud = load("0 0 0 1 1 1\n2 2 2 3 3 3\n4 4 4\n", 2).unwrap();
        let xs: Vec<f64> = cloud.iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_empty_input() {
        let cloud = load("", 0).unwrap();
        assert!(cloud.is_empty());
    }
}
