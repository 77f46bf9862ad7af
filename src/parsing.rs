//! CSV loading for HTTP download logs
//!
//! This module reads the exported download log, validates the required
//! columns, and converts epoch-millisecond timestamp fields into absolute
//! [`chrono`] instants. It also prepares the output directory that all
//! analysis artifacts are written into.

use crate::analysis::constants::OUTPUT_DIR_NAME;
use crate::common::DownloadRecord;
use chrono::DateTime;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns the input table must contain
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "request_uri",
    "first_timestamp_ms",
    "last_timestamp_ms",
    "duration_ms",
    "total_bytes",
    "client_port",
];

/// Errors that can occur while loading the input table
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// One raw row of the input table; extra columns are ignored
#[derive(Debug, Deserialize)]
struct RawRecord {
    request_uri: String,
    first_timestamp_ms: i64,
    last_timestamp_ms: i64,
    duration_ms: f64,
    total_bytes: f64,
    client_port: u32,
}

/// Loads all download records from a CSV log
///
/// Validates the header against [`REQUIRED_COLUMNS`] before reading any row,
/// then deserializes rows one by one, converting the epoch-millisecond
/// timestamp columns into UTC instants and coercing `duration_ms` to float.
///
/// # Arguments
/// * `csv_path` - Path to the exported download log
///
/// # Returns
/// * `Ok(Vec<DownloadRecord>)` - All rows in input order
/// * `Err(ParsingError)` - If the file is unreadable, a required column is
///   missing, or a row holds a non-numeric required field
pub fn load_records(csv_path: &Path) -> Result<Vec<DownloadRecord>> {
    let file = File::open(csv_path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ParsingError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        // Header is row 1 in the file, so data rows start at 2
        let row_number = index + 2;
        let raw = row.map_err(|e| ParsingError::InvalidRow {
            row: row_number,
            message: e.to_string(),
        })?;
        records.push(into_record(raw, row_number)?);
    }

    Ok(records)
}

fn into_record(raw: RawRecord, row_number: usize) -> Result<DownloadRecord> {
    let first_timestamp =
        DateTime::from_timestamp_millis(raw.first_timestamp_ms).ok_or_else(|| {
            ParsingError::InvalidRow {
                row: row_number,
                message: format!(
                    "first_timestamp_ms {} is outside the representable range",
                    raw.first_timestamp_ms
                ),
            }
        })?;
    let last_timestamp =
        DateTime::from_timestamp_millis(raw.last_timestamp_ms).ok_or_else(|| {
            ParsingError::InvalidRow {
                row: row_number,
                message: format!(
                    "last_timestamp_ms {} is outside the representable range",
                    raw.last_timestamp_ms
                ),
            }
        })?;

    Ok(DownloadRecord {
        request_uri: raw.request_uri,
        first_timestamp,
        last_timestamp,
        duration_ms: raw.duration_ms,
        total_bytes: raw.total_bytes,
        client_port: raw.client_port,
    })
}

/// Creates the analysis output directory next to the input file
///
/// The directory is named `wyniki_analizy` and lives in the same directory as
/// the input log. Creation is idempotent; an existing directory is reused.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the (possibly pre-existing) output directory
/// * `Err(ParsingError)` - If the directory could not be created
pub fn prepare_output_dir(csv_path: &Path) -> Result<PathBuf> {
    let parent = match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let out_dir = parent.join(OUTPUT_DIR_NAME);
    fs::create_dir_all(&out_dir).map_err(|source| ParsingError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;
    Ok(out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "request_uri,first_timestamp_ms,last_timestamp_ms,duration_ms,total_bytes,client_port";

    fn write_csv(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("log.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_records_valid_input() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n/index.html,1000,1300,300,1000,50001\n/style.css,1500,1800,300.5,2000,50002\n"
        );
        let path = write_csv(dir.path(), &csv);

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].request_uri, "/index.html");
        assert_eq!(records[0].start_ms(), 1000);
        assert_eq!(records[0].end_ms(), 1300);
        assert_eq!(records[0].duration_ms, 300.0);
        assert_eq!(records[1].duration_ms, 300.5);
        assert_eq!(records[1].client_port, 50002);
    }

    #[test]
    fn test_load_records_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER},http_status\n/index.html,1000,1300,300,1000,50001,200\n"
        );
        let path = write_csv(dir.path(), &csv);

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_records_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "request_uri,first_timestamp_ms,last_timestamp_ms,duration_ms,total_bytes\n";
        let path = write_csv(dir.path(), csv);

        let result = load_records(&path);
        match result {
            Err(ParsingError::MissingColumn(column)) => assert_eq!(column, "client_port"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_load_records_non_numeric_field() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!("{HEADER}\n/index.html,abc,1300,300,1000,50001\n");
        let path = write_csv(dir.path(), &csv);

        let result = load_records(&path);
        assert!(matches!(result, Err(ParsingError::InvalidRow { row: 2, .. })));
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("/nonexistent/log.csv"));
        assert!(matches!(result, Err(ParsingError::FileRead(_))));
    }

    #[test]
    fn test_prepare_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("log.csv");

        let first = prepare_output_dir(&csv_path).unwrap();
        assert!(first.is_dir());
        assert_eq!(first, dir.path().join(OUTPUT_DIR_NAME));

        // Second call must succeed against the existing directory
        let second = prepare_output_dir(&csv_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prepare_output_dir_bare_file_name() {
        // A bare file name has no parent directory; the output dir lands in
        // the current working directory in that case.
        let out = prepare_output_dir(Path::new("log.csv")).unwrap();
        assert_eq!(out, Path::new(".").join(OUTPUT_DIR_NAME));
        let _ = fs::remove_dir(&out);
    }
}
