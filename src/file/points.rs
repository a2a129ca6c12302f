// src/file/points.rs
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator};
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::DataPoint;

pub const COLUMN_COUNT: usize = 5;
pub const TIME_COLUMN: usize = 0;
pub const FITTED_CURVE_COLUMN: usize = 4;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } => path,
        }
    }
}

/// Rows that made it through parsing, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPoints {
    pub points: Vec<DataPoint>,
    pub skipped: usize,
}

/// Parses analysis CSV text. The first line is a header and always discarded.
///
/// A data row is kept only when it has exactly five comma-separated fields and
/// both the time (field 0) and fitted value (field 4) parse as finite floats.
/// Anything else is counted in `skipped` and left out. Fields 1-3 are ignored.
pub fn parse_points(text: &str) -> ParsedPoints {
    let body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => return ParsedPoints::default(),
    };

    let mut parsed = ParsedPoints::default();
    for line in body.lines() {
        match parse_row(line) {
            Some(point) => parsed.points.push(point),
            None => {
                debug!(row = line, "skipping malformed row");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

fn parse_row(line: &str) -> Option<DataPoint> {
    // Plain delimiter split: no quoting, no escapes, no whitespace trimming.
    // A stray `\r` inside the line stays part of its field.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    let record = match reader.records().next() {
        Some(Ok(record)) => record,
        _ => return None,
    };
    if record.len() != COLUMN_COUNT {
        return None;
    }

    let time = parse_finite(record.get(TIME_COLUMN)?)?;
    let fitted_curve = parse_finite(record.get(FITTED_CURVE_COLUMN)?)?;
    Some(DataPoint::new(time, fitted_curve))
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads the whole artifact before parsing; nothing is returned on a read failure.
pub fn load_points(path: &Path) -> Result<ParsedPoints, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_points(&text);
    info!(
        path = %path.display(),
        points = parsed.points.len(),
        skipped = parsed.skipped,
        "loaded analysis data"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    const SAMPLE: &str = "h1,h2,h3,h4,h5\n0.0,1,1,1,10.5\n0.1,1,1,1,9.8\nbadrow\n0.2,1,1,1,9.0\n";

    fn pairs(parsed: &ParsedPoints) -> Vec<(f64, f64)> {
        parsed.points.iter().map(|p| (p.time, p.fitted_curve)).collect()
    }

    #[test]
    fn drops_malformed_row_and_keeps_order() {
        let parsed = parse_points(SAMPLE);
        assert_eq!(pairs(&parsed), vec![(0.0, 10.5), (0.1, 9.8), (0.2, 9.0)]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn one_point_per_well_formed_row() {
        let mut text = String::from("Time,Distance,Velocity,Acceleration,FittedCurve\n");
        for i in 0..37 {
            text.push_str(&format!("{},{},{},{},{}\n", i as f64 / 30.0, 200 + i, -1.5, 0.2, 100.0 - i as f64));
        }
        let parsed = parse_points(&text);
        assert_eq!(parsed.points.len(), 37);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.points[36], DataPoint::new(36.0 / 30.0, 64.0));
    }

    #[test]
    fn header_only_or_empty_text_yields_no_points() {
        assert_eq!(parse_points(""), ParsedPoints::default());
        assert_eq!(parse_points("Time,Distance,Velocity,Acceleration,FittedCurve"), ParsedPoints::default());
        assert!(parse_points("Time,Distance,Velocity,Acceleration,FittedCurve\n").points.is_empty());
    }

    #[test]
    fn header_is_skipped_even_when_numeric() {
        let parsed = parse_points("1,2,3,4,5\n6,7,8,9,10\n");
        assert_eq!(pairs(&parsed), vec![(6.0, 10.0)]);
    }

    #[test]
    fn wrong_column_count_is_skipped() {
        let text = "h\n0.0,1,1,10.5\n0.1,1,1,1,9.8\n0.2,1,1,1,9.0,7\n";
        let parsed = parse_points(text);
        assert_eq!(pairs(&parsed), vec![(0.1, 9.8)]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn non_numeric_or_non_finite_fields_are_skipped() {
        let text = "h\nabc,1,1,1,1.0\n0.1,1,1,1,xyz\n0.2,x,y,z,3.0\n0.3,1,1,1,NaN\ninf,1,1,1,2.0\n";
        let parsed = parse_points(text);
        // Middle columns are never inspected
        assert_eq!(pairs(&parsed), vec![(0.2, 3.0)]);
        assert_eq!(parsed.skipped, 4);
    }

    #[test]
    fn quotes_are_not_special() {
        let parsed = parse_points("h\n\"0.0\",1,1,1,2.0\n0.5,\"a,b\",1,1,2.0\n");
        assert!(parsed.points.is_empty());
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn crlf_line_endings_parse() {
        let parsed = parse_points("Time,Distance,Velocity,Acceleration,FittedCurve\r\n0.0,1,1,1,10.5\r\n0.1,1,1,1,9.8\r\n");
        assert_eq!(pairs(&parsed), vec![(0.0, 10.5), (0.1, 9.8)]);
    }

    #[test]
    fn stray_carriage_return_stays_in_its_field() {
        let parsed = parse_points("h\n0.0,1,1,1,10.5\rjunk\n");
        assert!(parsed.points.is_empty());
        assert_eq!(parsed.skipped, 1);

        let parsed = parse_points("h\n0.0,1\r,1,1,10.5\n");
        assert_eq!(pairs(&parsed), vec![(0.0, 10.5)]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn load_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("droplet_data.csv");
        fs::write(&path, SAMPLE).unwrap();

        let first = load_points(&path).unwrap();
        let second = load_points(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.points.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = load_points(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        match &err {
            LoadError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::NotFound),
        }
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn invalid_utf8_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.csv");
        fs::write(&path, [b'h', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        let err = load_points(&path).unwrap_err();
        match &err {
            LoadError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::InvalidData),
        }
    }
}
