//! Report statistics sections

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// One category of a distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionEntry {
    /// Category label (OS name or port column)
    pub label: String,
    /// Number of rows in this category
    pub occurrences: u64,
    /// Share of all rows, e.g. "50%"
    pub percentage: String,
}

/// Category counts keyed by label, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<DistributionEntry>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distribution from (label, occurrences) counts over `total` rows
    pub fn from_counts<I>(counts: I, total: u64) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let entries = counts
            .into_iter()
            .map(|(label, occurrences)| DistributionEntry {
                label,
                occurrences,
                percentage: percentage(occurrences, total),
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&DistributionEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    /// Sum of occurrences across all categories
    pub fn total_occurrences(&self) -> u64 {
        self.entries.iter().map(|e| e.occurrences).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DistributionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("DistributionEntry", 2)?;
        entry.serialize_field("occurrences", &self.occurrences)?;
        entry.serialize_field("percentage", &self.percentage)?;
        entry.end()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, entry)?;
        }
        map.end()
    }
}

/// A titled statistics table for the report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatSection {
    /// Display title
    pub title: String,
    /// CSS class name derived from the title
    pub class_name: String,
    /// Table column headers
    pub headers: [String; 2],
    /// Category counts
    pub distribution: Distribution,
}

impl StatSection {
    pub fn new(title: &str, headers: [&str; 2], distribution: Distribution) -> Self {
        Self {
            title: title.to_string(),
            class_name: slugify(title),
            headers: headers.map(String::from),
            distribution,
        }
    }
}

/// Integer percentage of `occurrences` over `total`, "0%" when `total` is zero
pub fn percentage(occurrences: u64, total: u64) -> String {
    if total == 0 {
        return String::from("0%");
    }
    let pct = (occurrences as f64 / total as f64 * 100.0).round();
    format!("{}%", pct as u64)
}

/// CSS-safe slug: lower-case, non-alphanumeric runs collapsed to "-"
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), "50%");
        assert_eq!(percentage(3, 3), "100%");
        assert_eq!(percentage(1, 3), "33%");
        assert_eq!(percentage(2, 3), "67%");
        assert_eq!(percentage(0, 5), "0%");
        assert_eq!(percentage(0, 0), "0%");
        assert_eq!(percentage(4, 0), "0%");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("OS Breakdown"), "os-breakdown");
        assert_eq!(slugify("Open Port Breakdown"), "open-port-breakdown");
        assert_eq!(slugify("  TCP/UDP -- Ports! "), "tcp-udp-ports");
    }

    #[test]
    fn test_distribution_serializes_as_map() {
        let dist = Distribution::from_counts(
            vec![("Linux".to_string(), 1), ("Windows".to_string(), 3)],
            4,
        );
        let section = StatSection::new("OS Breakdown", ["Operating System", "Occurrences"], dist);
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["class_name"], "os-breakdown");
        assert_eq!(json["headers"][0], "Operating System");
        assert_eq!(json["distribution"]["Linux"]["occurrences"], 1);
        assert_eq!(json["distribution"]["Linux"]["percentage"], "25%");
        assert_eq!(json["distribution"]["Windows"]["percentage"], "75%");
        assert_eq!(section.distribution.total_occurrences(), 4);
    }
}
