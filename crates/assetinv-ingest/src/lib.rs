//! AssetInv Ingest - Asset scan inventory for pentest reports
//!
//! This crate turns an asset scanner CSV export into the data a report
//! renders:
//! - `classify`: column names into tool, vulnerability, credential and port groups
//! - `normalize`: each row into a `SummaryRow` with one summary field per group
//! - `aggregate`: OS and open port distributions over all rows
//!
//! # Example
//!
//! ```no_run
//! use assetinv_ingest::AssetInventory;
//!
//! let report = AssetInventory::build_from_file("zmap_assets.csv").unwrap();
//! println!("{} assets", report.assets.len());
//!
//! // Or degrade to an empty context instead of failing the report
//! let context = AssetInventory::render_context_from_file("zmap_assets.csv");
//! println!("{}", serde_json::to_string(&context).unwrap());
//! ```

pub mod aggregate;
pub mod classify;
pub mod component;
pub mod formats;
pub mod normalize;

pub use aggregate::{aggregate, breakdowns, Breakdowns};
pub use classify::classify;
pub use component::AssetInventoryComponent;
pub use formats::AssetTable;
pub use normalize::{normalize, Normalizer};

use assetinv_core::{ColumnGroups, Error, Result, StatSection, SummaryRow};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// CSV records read after the header
    pub records_processed: u32,
    /// Records turned into rows
    pub records_imported: u32,
    /// Records that could not be decoded
    pub records_skipped: u32,
    /// Rows with no `os` column
    pub rows_without_os: u32,
    /// Header columns
    pub columns: u32,
    /// Read and processing time in milliseconds
    pub duration_ms: u64,
}

/// Data handed to the report template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Normalized assets, in input order
    pub assets: Vec<SummaryRow>,
    /// OS and open port sections
    pub stats: Vec<StatSection>,
}

impl RenderContext {
    /// Context for a report whose source could not be processed
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Result of processing one asset export
#[derive(Debug, Clone, Default)]
pub struct AssetReport {
    /// Normalized assets, in input order
    pub assets: Vec<SummaryRow>,
    /// OS and open port sections
    pub stats: Vec<StatSection>,
    /// Column groups classified from the header
    pub groups: ColumnGroups,
    /// Import statistics
    pub ingest: IngestStats,
}

impl AssetReport {
    /// Classify, normalize and aggregate a table that has been read in full
    pub fn from_table(table: AssetTable, start: Instant) -> Self {
        let AssetTable {
            columns,
            rows,
            mut stats,
        } = table;

        let normalizer = Normalizer::from_columns(&columns);
        let assets = normalizer.normalize_all(&rows);
        let Breakdowns {
            sections,
            rows_without_os,
        } = breakdowns(&rows, &normalizer.groups().ports);

        stats.rows_without_os = rows_without_os;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Asset inventory built: {} assets, {} port columns in {}ms",
            assets.len(),
            normalizer.groups().ports.len(),
            stats.duration_ms
        );

        Self {
            assets,
            stats: sections,
            groups: normalizer.groups().clone(),
            ingest: stats,
        }
    }

    /// Drop build metadata, keeping what the template renders
    pub fn into_context(self) -> RenderContext {
        RenderContext {
            assets: self.assets,
            stats: self.stats,
        }
    }
}

/// Pipeline facade
pub struct AssetInventory;

impl AssetInventory {
    /// Build a report from a CSV file
    pub fn build_from_file(path: impl AsRef<Path>) -> Result<AssetReport> {
        let start = Instant::now();
        let table = formats::read_csv_file(path)?;
        Ok(AssetReport::from_table(table, start))
    }

    /// Build a report from CSV text
    pub fn build_from_str(csv_content: &str) -> Result<AssetReport> {
        let start = Instant::now();
        let table = formats::read_csv(csv_content, start)?;
        Ok(AssetReport::from_table(table, start))
    }

    /// Build a report from any CSV byte source
    pub fn build_from_reader<R: Read>(source: R) -> Result<AssetReport> {
        let start = Instant::now();
        let table = formats::read_csv_from_reader(source, start)?;
        Ok(AssetReport::from_table(table, start))
    }

    /// Render context from a CSV file, empty if the file cannot be processed
    pub fn render_context_from_file(path: impl AsRef<Path>) -> RenderContext {
        Self::or_empty(Self::build_from_file(path))
    }

    /// Render context from CSV text, empty if it cannot be processed
    pub fn render_context_from_str(csv_content: &str) -> RenderContext {
        Self::or_empty(Self::build_from_str(csv_content))
    }

    /// Render context from any CSV byte source, empty if it cannot be processed
    pub fn render_context_from_reader<R: Read>(source: R) -> RenderContext {
        Self::or_empty(Self::build_from_reader(source))
    }

    /// Degrade a failed build to an empty context so the report still renders
    pub fn or_empty(result: Result<AssetReport>) -> RenderContext {
        match result {
            Ok(report) => report.into_context(),
            Err(e) => {
                log_degraded(&e);
                RenderContext::empty()
            }
        }
    }
}

fn log_degraded(e: &Error) {
    if e.is_degradable() {
        error!(code = e.code(), "Asset inventory unavailable, rendering empty: {}", e);
    } else {
        error!(code = e.code(), "Unexpected asset inventory failure, rendering empty: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetinv_core::NONE_FOUND;

    #[test]
    fn test_build_from_str() {
        let csv = "IP,OS,Defender,Open FTP,22/tcp,3389/tcp\n\
                   10.0.0.1,Linux,,anonymous,Open,Closed\n\
                   10.0.0.2,Windows,Yes,,Closed,Open\n";
        let report = AssetInventory::build_from_str(csv).unwrap();

        assert_eq!(report.assets.len(), 2);
        assert_eq!(report.groups.credentials, vec!["open_ftp"]);
        assert_eq!(report.assets[0].default_creds, "open_ftp");
        assert_eq!(report.assets[0].installed_tools, NONE_FOUND);
        assert_eq!(report.assets[1].open_ports, "3389/tcp");
        assert_eq!(report.ingest.records_imported, 2);
        assert_eq!(report.ingest.rows_without_os, 0);
    }

    #[test]
    fn test_rows_without_os_counted_once() {
        let csv = "IP,OS,22/tcp\n10.0.0.1,Linux,Open\n10.0.0.2\n10.0.0.3\n";
        let report = AssetInventory::build_from_str(csv).unwrap();

        assert_eq!(report.ingest.rows_without_os, 2);
        let os = &report.stats[0].distribution;
        assert_eq!(
            os.total_occurrences() + u64::from(report.ingest.rows_without_os),
            report.assets.len() as u64
        );
    }

    #[test]
    fn test_or_empty_degrades_errors() {
        let context = AssetInventory::or_empty(Err(Error::InvalidHeader(String::from("bad"))));
        assert_eq!(context, RenderContext::empty());
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let context = AssetInventory::render_context_from_file("/nonexistent/assets.csv");
        assert!(context.assets.is_empty());
        assert!(context.stats.is_empty());
    }

    #[test]
    fn test_context_serializes_two_keys() {
        let context = AssetInventory::render_context_from_str("OS\nLinux\n");
        let json = serde_json::to_value(&context).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["assets", "stats"]);
    }
}
