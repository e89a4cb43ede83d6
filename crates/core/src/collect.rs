//! Order-preserving deduplication of extracted records.

use std::collections::HashSet;

use crate::exhibitor::Exhibitor;

/// Whether [`Collector::accept`] kept the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// First record with this profile URL; it was appended.
    Added,

    /// The profile URL was already seen; the record was dropped.
    Duplicate,
}

/// Accumulates records, keeping only the first occurrence of each profile
/// URL and preserving arrival order among the kept ones.
#[derive(Debug, Default)]
pub struct Collector {
    seen: HashSet<String>,
    records: Vec<Exhibitor>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `record` unless its profile URL was seen before.
    ///
    /// Identity is the `profile_url` string verbatim. Records without a
    /// profile URL all share the empty-string identity, so at most one of
    /// them survives; callers that care can count the drops via the
    /// returned [`Acceptance`].
    pub fn accept(&mut self, record: Exhibitor) -> Acceptance {
        if self.seen.insert(record.profile_url.clone()) {
            self.records.push(record);
            Acceptance::Added
        } else {
            Acceptance::Duplicate
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Kept records, in arrival order.
    pub fn records(&self) -> &[Exhibitor] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Exhibitor> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, url: &str) -> Exhibitor {
        Exhibitor { name: name.to_string(), profile_url: url.to_string(), ..Exhibitor::default() }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut collector = Collector::new();
        assert_eq!(collector.accept(record("Acme", "https://d/1")), Acceptance::Added);
        assert_eq!(collector.accept(record("Acme Again", "https://d/1")), Acceptance::Duplicate);

        assert_eq!(collector.len(), 1);
        assert_eq!(collector.records()[0].name, "Acme");
    }

    #[test]
    fn test_preserves_arrival_order() {
        let mut collector = Collector::new();
        collector.accept(record("B", "https://d/b"));
        collector.accept(record("A", "https://d/a"));
        collector.accept(record("C", "https://d/c"));

        let names: Vec<&str> = collector.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty_urls_share_one_slot() {
        let mut collector = Collector::new();
        assert_eq!(collector.accept(record("No Link One", "")), Acceptance::Added);
        assert_eq!(collector.accept(record("No Link Two", "")), Acceptance::Duplicate);

        assert_eq!(collector.len(), 1);
        assert_eq!(collector.records()[0].name, "No Link One");
    }

    #[test]
    fn test_into_records_hands_back_kept() {
        let mut collector = Collector::new();
        collector.accept(record("A", "https://d/a"));
        collector.accept(record("B", "https://d/b"));
        collector.accept(record("A dup", "https://d/a"));

        let records = collector.into_records();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_new_collector_is_empty() {
        let collector = Collector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
    }
}
