//! Asset rows as read from the scanner export and as handed to the renderer

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Sentinel used when a summarized group has no positive matches
pub const NONE_FOUND: &str = "None found";

/// Derived summary field for security tool columns
pub const INSTALLED_TOOLS: &str = "installed_tools";
/// Derived summary field for vulnerability columns
pub const VULNERABILITIES: &str = "vulnerabilities";
/// Derived summary field for port columns
pub const OPEN_PORTS: &str = "open_ports";
/// Derived summary field for default credential columns
pub const DEFAULT_CREDS: &str = "default_creds";

/// All derived summary field names, in output order
pub const DERIVED_FIELDS: [&str; 4] = [INSTALLED_TOOLS, VULNERABILITIES, OPEN_PORTS, DEFAULT_CREDS];

/// Normalize a CSV header into a column name: lower-case, spaces become `_`
pub fn normalize_column_name(header: &str) -> String {
    header.to_lowercase().replace(' ', "_")
}

/// One asset line of the scanner export, keyed by normalized column name.
///
/// Columns keep header order. Inserting a column that already exists
/// replaces its value in place, so a duplicated header keeps the value of
/// its last occurrence. Lookups go through a column index, so wide exports
/// (one column per scanned port) stay linear to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Build a row from (column, value) pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs.into_iter();
        let mut row = Self::with_capacity(pairs.size_hint().0);
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }

    fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.index.get(&column).copied() {
            Some(i) => self.fields[i].1 = value,
            None => {
                self.index.insert(column.clone(), self.fields.len());
                self.fields.push((column, value));
            }
        }
    }

    /// Value of a column, if the row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.index.get(column).map(|&i| self.fields[i].1.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A normalized asset row ready for display.
///
/// Holds the pass-through columns of the raw row (every classified column
/// removed) followed by the four derived summary fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Columns carried over unchanged from the raw row
    pub columns: RawRow,
    /// Security tools with a non-empty flag
    pub installed_tools: String,
    /// Vulnerabilities with a non-empty flag
    pub vulnerabilities: String,
    /// Port columns reported "Open"
    pub open_ports: String,
    /// Default credential exposures with a non-empty flag
    pub default_creds: String,
}

impl SummaryRow {
    /// Build a summary row from pass-through columns and the matches of each group.
    ///
    /// Pass-through columns named like a derived field are dropped so the
    /// derived value is the only one rendered.
    pub fn new(
        columns: RawRow,
        installed_tools: &[String],
        vulnerabilities: &[String],
        open_ports: &[String],
        default_creds: &[String],
    ) -> Self {
        let columns = columns
            .iter()
            .filter(|(c, _)| !DERIVED_FIELDS.iter().any(|d| d == c))
            .collect();

        Self {
            columns,
            installed_tools: summarize(installed_tools),
            vulnerabilities: summarize(vulnerabilities),
            open_ports: summarize(open_ports),
            default_creds: summarize(default_creds),
        }
    }

    /// Value of a pass-through column or derived field
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            INSTALLED_TOOLS => Some(self.installed_tools.as_str()),
            VULNERABILITIES => Some(self.vulnerabilities.as_str()),
            OPEN_PORTS => Some(self.open_ports.as_str()),
            DEFAULT_CREDS => Some(self.default_creds.as_str()),
            _ => self.columns.get(column),
        }
    }

    /// Derived fields as (name, value) pairs
    pub fn derived(&self) -> [(&'static str, &str); 4] {
        [
            (INSTALLED_TOOLS, self.installed_tools.as_str()),
            (VULNERABILITIES, self.vulnerabilities.as_str()),
            (OPEN_PORTS, self.open_ports.as_str()),
            (DEFAULT_CREDS, self.default_creds.as_str()),
        ]
    }

    /// Flatten back into a raw row (pass-through columns, then derived fields)
    pub fn to_raw_row(&self) -> RawRow {
        self.columns
            .iter()
            .chain(self.derived())
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }
}

impl Serialize for SummaryRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + DERIVED_FIELDS.len()))?;
        for (column, value) in self.columns.iter().chain(self.derived()) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Join matches with ", ", or the "None found" sentinel when empty
pub fn summarize(matches: &[String]) -> String {
    if matches.is_empty() {
        NONE_FOUND.to_string()
    } else {
        matches.join(", ")
    }
}
