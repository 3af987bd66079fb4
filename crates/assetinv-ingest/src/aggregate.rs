//! Report statistics over raw asset rows

use assetinv_core::{Distribution, RawRow, StatSection, OS_COLUMN, PORT_OPEN};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const OS_BREAKDOWN_TITLE: &str = "OS Breakdown";
pub const OS_BREAKDOWN_HEADERS: [&str; 2] = ["Operating System", "Occurrences"];

pub const PORT_BREAKDOWN_TITLE: &str = "Open Port Breakdown";
pub const PORT_BREAKDOWN_HEADERS: [&str; 2] = ["Port", "Occurrences"];

/// Report sections plus the rows the OS section had to leave out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdowns {
    /// OS and open port sections, in that order
    pub sections: Vec<StatSection>,
    pub rows_without_os: u32,
}

/// Compute the OS and open port sections, in that order
pub fn aggregate<S: AsRef<str>>(rows: &[RawRow], port_columns: &[S]) -> Vec<StatSection> {
    breakdowns(rows, port_columns).sections
}

pub fn breakdowns<S: AsRef<str>>(rows: &[RawRow], port_columns: &[S]) -> Breakdowns {
    let (os, rows_without_os) = os_breakdown(rows);
    Breakdowns {
        sections: vec![os, port_breakdown(rows, port_columns)],
        rows_without_os,
    }
}

/// Rows grouped by their literal `os` value, with the number of rows that
/// have no `os` column.
///
/// Those rows are left out of the distribution but still count towards the
/// percentage denominator.
pub fn os_breakdown(rows: &[RawRow]) -> (StatSection, u32) {
    let total = rows.len() as u64;
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut missing = 0u32;

    for row in rows {
        let Some(os) = row.get(OS_COLUMN) else {
            missing += 1;
            continue;
        };
        match index.get(os) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(os, counts.len());
                counts.push((os.to_string(), 1));
            }
        }
    }

    if missing > 0 {
        warn!(
            "{} of {} rows have no '{}' column, excluded from {}",
            missing, total, OS_COLUMN, OS_BREAKDOWN_TITLE
        );
    }
    debug!("{} distinct operating systems", counts.len());

    let section = StatSection::new(
        OS_BREAKDOWN_TITLE,
        OS_BREAKDOWN_HEADERS,
        Distribution::from_counts(counts, total),
    );
    (section, missing)
}

/// Rows reporting each port column "Open".
///
/// Percentages are over all rows, not over hosts with an open port. Ports
/// never seen open are omitted.
pub fn port_breakdown<S: AsRef<str>>(rows: &[RawRow], port_columns: &[S]) -> StatSection {
    let total = rows.len() as u64;

    let counts: Vec<(String, u64)> = port_columns
        .iter()
        .map(|c| c.as_ref())
        .map(|port| {
            let open = rows
                .iter()
                .filter(|row| row.get(port) == Some(PORT_OPEN))
                .count() as u64;
            (port.to_string(), open)
        })
        .filter(|(_, open)| *open > 0)
        .collect();

    debug!(
        "{} of {} port columns seen open",
        counts.len(),
        port_columns.len()
    );

    StatSection::new(
        PORT_BREAKDOWN_TITLE,
        PORT_BREAKDOWN_HEADERS,
        Distribution::from_counts(counts, total),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(os: &str, ports: &[(&str, &str)]) -> RawRow {
        std::iter::once(("os", os))
            .chain(ports.iter().copied())
            .collect()
    }

    #[test]
    fn test_sections_in_order() {
        let sections = aggregate::<&str>(&[], &[]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "OS Breakdown");
        assert_eq!(sections[0].class_name, "os-breakdown");
        assert_eq!(sections[1].title, "Open Port Breakdown");
        assert_eq!(sections[1].class_name, "open-port-breakdown");
    }

    #[test]
    fn test_os_breakdown_counts_literal_values() {
        let rows = vec![
            row("Windows 10", &[]),
            row("windows 10", &[]),
            row("Windows 10", &[]),
            row("Linux", &[]),
        ];
        let (section, missing) = os_breakdown(&rows);
        let dist = &section.distribution;
        assert_eq!(missing, 0);

        assert_eq!(dist.len(), 3);
        assert_eq!(dist.get("Windows 10").unwrap().occurrences, 2);
        assert_eq!(dist.get("Windows 10").unwrap().percentage, "50%");
        assert_eq!(dist.get("windows 10").unwrap().percentage, "25%");
        assert_eq!(dist.total_occurrences(), rows.len() as u64);
        let labels: Vec<_> = dist.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Windows 10", "windows 10", "Linux"]);
    }

    #[test]
    fn test_single_category_is_hundred_percent() {
        let rows = vec![row("FreeBSD", &[]); 7];
        let (section, _) = os_breakdown(&rows);
        assert_eq!(section.distribution.len(), 1);
        assert_eq!(section.distribution.get("FreeBSD").unwrap().percentage, "100%");
    }

    #[test]
    fn test_rows_without_os_are_excluded() {
        let rows = vec![
            row("Linux", &[]),
            RawRow::from_pairs([("ip", "10.0.0.2")]),
        ];
        let (section, missing) = os_breakdown(&rows);
        assert_eq!(missing, 1);
        let linux = section.distribution.get("Linux").unwrap();
        assert_eq!(linux.occurrences, 1);
        assert_eq!(linux.percentage, "50%");
        assert_eq!(section.distribution.total_occurrences(), 1);
    }

    #[test]
    fn test_port_breakdown_uses_all_rows_as_denominator() {
        let rows = vec![
            row("Linux", &[("22/tcp", "Open"), ("80/tcp", "Open")]),
            row("Linux", &[("22/tcp", "Open"), ("80/tcp", "Closed")]),
            row("Windows", &[("22/tcp", "Filtered"), ("80/tcp", "open")]),
            row("Windows", &[("22/tcp", "Closed"), ("80/tcp", "Closed")]),
        ];
        let section = port_breakdown(&rows, &["22/tcp", "80/tcp", "443/tcp"]);
        let dist = &section.distribution;

        assert_eq!(dist.get("22/tcp").unwrap().occurrences, 2);
        assert_eq!(dist.get("22/tcp").unwrap().percentage, "50%");
        assert_eq!(dist.get("80/tcp").unwrap().percentage, "25%");
        assert!(dist.get("443/tcp").is_none());
    }

    #[test]
    fn test_port_occurrences_may_exceed_rows() {
        let rows = vec![row("Linux", &[("22/tcp", "Open"), ("80", "Open"), ("161/udp", "Open")])];
        let section = port_breakdown(&rows, &["22/tcp", "80", "161/udp"]);
        assert_eq!(section.distribution.total_occurrences(), 3);
        assert!(section
            .distribution
            .entries()
            .iter()
            .all(|e| e.percentage == "100%"));
    }

    #[test]
    fn test_breakdowns_report_rows_without_os() {
        let rows = vec![
            row("Linux", &[("22/tcp", "Open")]),
            RawRow::from_pairs([("22/tcp", "Open")]),
            RawRow::from_pairs([("ip", "10.0.0.3")]),
        ];
        let result = breakdowns(&rows, &["22/tcp"]);

        assert_eq!(result.rows_without_os, 2);
        assert_eq!(result.sections, aggregate(&rows, &["22/tcp"]));
        assert_eq!(result.sections[0].distribution.total_occurrences(), 1);
        assert_eq!(
            result.sections[1].distribution.get("22/tcp").unwrap().percentage,
            "67%"
        );
    }

    #[test]
    fn test_empty_rows_do_not_divide_by_zero() {
        let sections = aggregate(&[], &["22/tcp"]);
        assert!(sections[0].distribution.is_empty());
        assert!(sections[1].distribution.is_empty());
    }
}
