//! Row normalization: collapse classified columns into summary fields

use crate::classify::classify;
use assetinv_core::{ColumnGroups, RawRow, SummaryRow, PORT_OPEN};
use std::collections::HashSet;

/// Normalizer bound to the column groups of one export.
///
/// Groups are classified once from the header row and reused for every row,
/// together with the set of all group members.
#[derive(Debug, Clone)]
pub struct Normalizer {
    groups: ColumnGroups,
    members: HashSet<String>,
}

impl Normalizer {
    pub fn new(groups: ColumnGroups) -> Self {
        let members = groups.members().map(str::to_string).collect();
        Self { groups, members }
    }

    /// Classify the header row and bind the resulting groups
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self::new(classify(columns))
    }

    pub fn groups(&self) -> &ColumnGroups {
        &self.groups
    }

    pub fn normalize(&self, row: &RawRow) -> SummaryRow {
        summarize_row(row, &self.groups, |c| self.members.contains(c))
    }

    /// Normalize every row, preserving input order
    pub fn normalize_all(&self, rows: &[RawRow]) -> Vec<SummaryRow> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }
}

/// Build the summary row for one asset.
///
/// Tool, vulnerability and credential columns match on any non-empty
/// value; port columns match only on exactly "Open". Every group column is
/// dropped from the output whether it matched or not.
pub fn normalize(row: &RawRow, groups: &ColumnGroups) -> SummaryRow {
    let members: HashSet<&str> = groups.members().collect();
    summarize_row(row, groups, |c| members.contains(c))
}

fn summarize_row(
    row: &RawRow,
    groups: &ColumnGroups,
    is_member: impl Fn(&str) -> bool,
) -> SummaryRow {
    let installed_tools = flagged(row, &groups.tools);
    let vulnerabilities = flagged(row, &groups.vulnerabilities);
    let open_ports = open_ports(row, &groups.ports);
    let default_creds = flagged(row, &groups.credentials);

    let columns: RawRow = row.iter().filter(|(c, _)| !is_member(*c)).collect();

    SummaryRow::new(
        columns,
        &installed_tools,
        &vulnerabilities,
        &open_ports,
        &default_creds,
    )
}

fn flagged(row: &RawRow, group: &[String]) -> Vec<String> {
    matching(row, group, |value| !value.is_empty())
}

fn open_ports(row: &RawRow, ports: &[String]) -> Vec<String> {
    matching(row, ports, |value| value == PORT_OPEN)
}

fn matching(row: &RawRow, group: &[String], is_match: impl Fn(&str) -> bool) -> Vec<String> {
    group
        .iter()
        .filter(|column| row.get(column).is_some_and(&is_match))
        .cloned()
        .collect()
}
