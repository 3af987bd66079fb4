//! Column classification for asset scan exports

use assetinv_core::{
    ColumnGroups, CREDENTIAL_COLUMNS, PORT_COLUMN_PATTERN, TOOL_COLUMNS, VULNERABILITY_COLUMNS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PORT_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(PORT_COLUMN_PATTERN).expect("port column pattern is valid"));

/// Check whether a column name denotes a port ("22/tcp", "161/udp", "80")
pub fn is_port_column(column: &str) -> bool {
    PORT_COLUMN.is_match(column)
}

/// Partition normalized column names into their semantic groups.
///
/// Vocabulary groups and the port pattern are tested independently, so a
/// column matching both lands in both. Call once per header row.
pub fn classify<S: AsRef<str>>(columns: &[S]) -> ColumnGroups {
    let mut groups = ColumnGroups::default();
    let mut seen = HashSet::new();

    // A duplicated header lands in the same groups as its first occurrence
    for column in columns.iter().map(|c| c.as_ref()) {
        if !seen.insert(column) {
            continue;
        }
        if in_vocabulary(TOOL_COLUMNS, column) {
            groups.tools.push(column.to_string());
        }
        if in_vocabulary(VULNERABILITY_COLUMNS, column) {
            groups.vulnerabilities.push(column.to_string());
        }
        if in_vocabulary(CREDENTIAL_COLUMNS, column) {
            groups.credentials.push(column.to_string());
        }
        if is_port_column(column) {
            groups.ports.push(column.to_string());
        }
    }

    groups
}

fn in_vocabulary(vocabulary: &[&str], column: &str) -> bool {
    vocabulary.iter().any(|v| *v == column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_pattern() {
        assert!(is_port_column("22/tcp"));
        assert!(is_port_column("161/udp"));
        assert!(is_port_column("80"));
        assert!(is_port_column("443/tcp_https"));
        assert!(!is_port_column("tcp/22"));
        assert!(!is_port_column("161/udp_snmp"));
        assert!(!is_port_column("os"));
        assert!(!is_port_column(""));
    }

    #[test]
    fn test_classify_groups() {
        let columns = [
            "ip",
            "os",
            "defender",
            "splunk",
            "vulnerable_to_eternalblue",
            "open_ftp",
            "default_ssh_login",
            "22/tcp",
            "161/udp",
        ];
        let groups = classify(&columns);

        assert_eq!(groups.tools, vec!["defender", "splunk"]);
        assert_eq!(groups.vulnerabilities, vec!["vulnerable_to_eternalblue"]);
        assert_eq!(groups.credentials, vec!["open_ftp", "default_ssh_login"]);
        assert_eq!(groups.ports, vec!["22/tcp", "161/udp"]);
        assert!(!groups.contains("ip"));
        assert!(!groups.contains("os"));
    }

    #[test]
    fn test_classify_is_exact_match() {
        let groups = classify(&["Defender", "defender_version", "crowdstrike "]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let columns = vec!["os".to_string(), "sophos".to_string(), "3389/tcp".to_string()];
        assert_eq!(classify(&columns), classify(&columns));
    }

    #[test]
    fn test_duplicate_headers_recorded_once() {
        let groups = classify(&["wmi", "wmi", "80", "80"]);
        assert_eq!(groups.tools, vec!["wmi"]);
        assert_eq!(groups.ports, vec!["80"]);
    }
}
