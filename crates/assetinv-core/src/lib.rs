//! AssetInv Core - Data model, column vocabularies and error handling
//!
//! This crate provides the types shared by the asset inventory pipeline:
//! - `RawRow` / `SummaryRow`: an asset line before and after normalization
//! - `ColumnGroups`: the semantic column groups of a scanner export
//! - `StatSection` / `Distribution`: report statistics tables
//! - `Error`, `Result`: the error taxonomy

pub mod columns;
pub mod error;
pub mod row;
pub mod stats;

// Re-export commonly used types at crate root
pub use columns::{
    ColumnGroups, CREDENTIAL_COLUMNS, OS_COLUMN, PORT_COLUMN_PATTERN, PORT_OPEN, TOOL_COLUMNS,
    VULNERABILITY_COLUMNS,
};
pub use error::{Error, Result};
pub use row::{normalize_column_name, RawRow, SummaryRow, DERIVED_FIELDS, NONE_FOUND};
pub use stats::{Distribution, DistributionEntry, StatSection};
