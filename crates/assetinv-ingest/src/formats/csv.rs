//! CSV reader for asset scan exports

use crate::IngestStats;
use assetinv_core::{normalize_column_name, Error, RawRow, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Rows of one export, fully read into memory
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    /// Normalized column names in header order
    pub columns: Vec<String>,
    /// One raw row per decoded CSV record
    pub rows: Vec<RawRow>,
    /// Read statistics
    pub stats: IngestStats,
}

/// Read an asset scan export from disk
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<AssetTable> {
    let start = Instant::now();
    let path = path.as_ref();

    info!("Reading asset CSV file: {}", path.display());

    let file = std::fs::File::open(path)
        .map_err(|e| Error::source_unavailable(path.display().to_string(), e))?;
    read_csv_from_reader(file, start)
}

/// Read an asset scan export held in memory
pub fn read_csv(csv_content: &str, start: Instant) -> Result<AssetTable> {
    read_csv_from_reader(csv_content.as_bytes(), start)
}

/// Read an asset scan export from any byte source.
///
/// Header names are lower-cased and spaces become `_`, surrounding spaces
/// included, so `" Defender"` reads as `_defender`. Records that cannot be
/// decoded are skipped and counted; short records simply lack their
/// trailing columns.
pub fn read_csv_from_reader<R: Read>(source: R, start: Instant) -> Result<AssetTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let columns: Vec<String> = reader
        .headers()
        .map_err(header_error)?
        .iter()
        .map(normalize_column_name)
        .collect();

    let mut rows = Vec::new();
    let mut stats = IngestStats {
        columns: columns.len() as u32,
        ..Default::default()
    };

    for result in reader.records() {
        stats.records_processed += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let err = malformed_row(e, stats.records_processed);
                warn!(code = err.code(), "Skipping CSV row: {}", err);
                stats.records_skipped += 1;
                continue;
            }
        };

        if record.len() > columns.len() {
            warn!(
                "CSV row {} has {} fields for {} columns, extra fields ignored",
                stats.records_processed,
                record.len(),
                columns.len()
            );
        }

        let row: RawRow = columns.iter().cloned().zip(record.iter()).collect();
        rows.push(row);
        stats.records_imported += 1;
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "CSV read complete: {} rows, {} columns in {}ms",
        rows.len(),
        columns.len(),
        stats.duration_ms
    );

    Ok(AssetTable {
        columns,
        rows,
        stats,
    })
}

/// Describe an undecodable record by its input line, falling back to its record number
fn malformed_row(e: csv::Error, record: u32) -> Error {
    let line = e
        .position()
        .map(|p| p.line())
        .unwrap_or(u64::from(record) + 1);
    Error::MalformedRow {
        line,
        message: e.to_string(),
    }
}

fn header_error(e: csv::Error) -> Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        kind => Error::InvalidHeader(format!("{:?}", kind)),
    }
}
