//! File format readers for asset scan exports

pub mod csv;

pub use self::csv::{read_csv, read_csv_file, read_csv_from_reader, AssetTable};
