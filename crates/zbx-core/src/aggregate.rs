//! Order-preserving grouping of unsupported findings.
//!
//! Groups appear in the order their key was first seen, and records keep
//! their arrival order inside a group. Nothing is ever re-sorted: the
//! exporter writes exactly the order enumeration produced.
//!
//! Findings are not deduplicated. An item a host inherits from a template and
//! the same item reported on the template are two records, and when both
//! spaces are audited they land in two separate [`ReportGroups`] values.

use std::collections::HashMap;

use serde::Serialize;

use crate::enums::{EntityKind, RecordKind};
use crate::records::{NormalizedRecord, UnsupportedRecord};

/// Findings for one owning host or template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub key: String,
    pub records: Vec<NormalizedRecord>,
}

/// Group key → records, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportGroups {
    groups: Vec<ReportGroup>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ReportGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `record` and append it to the group named `key`.
    pub fn push(&mut self, key: &str, record: UnsupportedRecord) {
        self.push_normalized(key, record.normalized());
    }

    fn push_normalized(&mut self, key: &str, record: NormalizedRecord) {
        if let Some(&slot) = self.index.get(key) {
            self.groups[slot].records.push(record);
            return;
        }
        self.index.insert(key.to_string(), self.groups.len());
        self.groups.push(ReportGroup {
            key: key.to_string(),
            records: vec![record],
        });
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReportGroup> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportGroup> {
        self.groups.iter()
    }

    /// Group keys in encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.key.as_str())
    }

    /// Every record, group by group.
    pub fn records(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.groups.iter().flat_map(|group| group.records.iter())
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }

    #[must_use]
    pub fn count_kind(&self, kind: RecordKind) -> usize {
        self.records().filter(|record| record.kind() == kind).count()
    }

    /// Copy of these groups restricted to one record kind.
    ///
    /// Groups left without records are dropped; the relative order of the
    /// remaining groups and records is unchanged.
    #[must_use]
    pub fn only_kind(&self, kind: RecordKind) -> Self {
        let mut filtered = Self::new();
        for group in &self.groups {
            for record in group.records.iter().filter(|record| record.kind() == kind) {
                filtered.push_normalized(&group.key, record.clone());
            }
        }
        filtered
    }
}

impl<'a> IntoIterator for &'a ReportGroups {
    type Item = &'a ReportGroup;
    type IntoIter = std::slice::Iter<'a, ReportGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>> FromIterator<(K, UnsupportedRecord)> for ReportGroups {
    fn from_iter<I: IntoIterator<Item = (K, UnsupportedRecord)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (key, record) in iter {
            groups.push(key.as_ref(), record);
        }
        groups
    }
}

impl<K: AsRef<str>> Extend<(K, UnsupportedRecord)> for ReportGroups {
    fn extend<I: IntoIterator<Item = (K, UnsupportedRecord)>>(&mut self, iter: I) {
        for (key, record) in iter {
            self.push(key.as_ref(), record);
        }
    }
}

/// Findings of one group space (host-keyed or template-keyed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSpace {
    pub kind: EntityKind,
    /// Number of entities of `kind` that were inspected.
    pub entities_checked: usize,
    pub groups: ReportGroups,
}

impl GroupSpace {
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entities_checked: 0,
            groups: ReportGroups::new(),
        }
    }
}

/// Group `(key, record)` pairs, normalizing each record's error text.
///
/// An empty input yields empty groups.
pub fn aggregate<K, I>(records: I) -> ReportGroups
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, UnsupportedRecord)>,
{
    records.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn item(owner: &str, name: &str) -> UnsupportedRecord {
        UnsupportedRecord::new(RecordKind::Item, owner, name, "err")
    }

    fn rule(owner: &str, name: &str) -> UnsupportedRecord {
        UnsupportedRecord::new(RecordKind::DiscoveryRule, owner, name, "err")
    }

    fn names<'a>(groups: &'a ReportGroups, key: &str) -> Vec<&'a str> {
        groups
            .get(key)
            .map(|group| group.records.iter().map(NormalizedRecord::name).collect())
            .unwrap_or_default()
    }

    #[test]
    fn preserves_first_seen_group_and_record_order() {
        let groups = aggregate([
            ("A", item("A", "r1")),
            ("B", item("B", "r2")),
            ("A", item("A", "r3")),
        ]);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(names(&groups, "A"), vec!["r1", "r3"]);
        assert_eq!(names(&groups, "B"), vec!["r2"]);
    }

    #[test]
    fn groups_are_not_sorted_alphabetically() {
        let groups = aggregate([("zeta", item("zeta", "x")), ("alpha", item("alpha", "y"))]);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn empty_input_is_empty_groups() {
        let groups = aggregate(Vec::<(String, UnsupportedRecord)>::new());
        assert!(groups.is_empty());
        assert_eq!(groups.record_count(), 0);
    }

    #[test]
    fn identical_records_are_kept_twice() {
        let groups = aggregate([("web01", item("web01", "cpu")), ("web01", item("web01", "cpu"))]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.record_count(), 2);
    }

    #[test]
    fn push_normalizes_error_text() {
        let mut groups = ReportGroups::new();
        groups.push(
            "web01",
            UnsupportedRecord::new(RecordKind::Item, "web01", "cpu.load", " timeout\r\nwaiting "),
        );
        assert_eq!(groups.records().next().unwrap().error(), "timeout  waiting");
    }

    #[test]
    fn only_kind_drops_emptied_groups() {
        let groups = aggregate([
            ("A", item("A", "i1")),
            ("B", rule("B", "d1")),
            ("A", rule("A", "d2")),
            ("C", item("C", "i2")),
        ]);

        let items = groups.only_kind(RecordKind::Item);
        assert_eq!(items.keys().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(items.record_count(), 2);

        let rules = groups.only_kind(RecordKind::DiscoveryRule);
        assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(groups.count_kind(RecordKind::DiscoveryRule), 2);
    }

    #[test]
    fn serializes_as_ordered_list() {
        let groups = aggregate([("web01", item("web01", "cpu"))]);
        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(json[0]["key"], "web01");
        assert_eq!(json[0]["records"][0]["kind"], "item");
    }
}
