//! Fixed column vocabularies and the classified column groups

use serde::Serialize;

/// Security tool columns recognized in asset scan exports
pub const TOOL_COLUMNS: &[&str] = &[
    "wmi",
    "defender",
    "symantec",
    "altiris",
    "cisco_fireamp",
    "cisco_anyconnect",
    "snare",
    "malwarebytes",
    "ivanti",
    "sophos",
    "webroot",
    "kaseya",
    "carbon_black",
    "red_cloak",
    "splunk",
    "bitdefender",
    "solarwinds",
    "crowdstrike",
];

/// Vulnerability flag columns
pub const VULNERABILITY_COLUMNS: &[&str] = &["vulnerable_to_eternalblue"];

/// Default credential / open service exposure columns
pub const CREDENTIAL_COLUMNS: &[&str] = &["default_ssh_login", "open_ftp", "open_nfs", "open_vnc"];

/// Pattern matched by port column names ("22/tcp", "161/udp", "80")
pub const PORT_COLUMN_PATTERN: &str = r"^\d+(?:/tcp.*|/udp)?$";

/// Column used for the OS breakdown
pub const OS_COLUMN: &str = "os";

/// Cell value marking a port column as open
pub const PORT_OPEN: &str = "Open";

/// Semantic column groups derived once from a header row.
///
/// Members keep header order and appear once each. The three vocabulary
/// groups are disjoint; a column may sit in a vocabulary group and in
/// `ports` at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnGroups {
    /// Security tool columns
    pub tools: Vec<String>,
    /// Vulnerability flag columns
    pub vulnerabilities: Vec<String>,
    /// Default credential columns
    pub credentials: Vec<String>,
    /// Port/protocol columns
    pub ports: Vec<String>,
}

impl ColumnGroups {
    /// Groups with no members; normalizing with these only re-derives summaries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether a column belongs to any group
    pub fn contains(&self, column: &str) -> bool {
        self.members().any(|c| c == column)
    }

    /// Every member column across all groups (may repeat for doubly classified columns)
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.tools
            .iter()
            .chain(&self.vulnerabilities)
            .chain(&self.credentials)
            .chain(&self.ports)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.vulnerabilities.is_empty()
            && self.credentials.is_empty()
            && self.ports.is_empty()
    }
}
