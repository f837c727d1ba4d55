//! Entity kinds, finding kinds, and report granularity for zbx-audit.
//!
//! Enums that appear in configuration use kebab-case serialization and
//! implement `FromStr` so the CLI and the config layer accept the same
//! spellings (`per-kind` and `per_kind` are equivalent).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of a monitored entity that owns items and discovery rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Host,
    Template,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Template => "template",
        }
    }

    /// Header label of the group column in exported reports.
    #[must_use]
    pub const fn group_label(self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Template => "Template",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Kind of an unsupported finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Item,
    DiscoveryRule,
}

impl RecordKind {
    /// All kinds, in the order reports list them.
    pub const ALL: [Self; 2] = [Self::Item, Self::DiscoveryRule];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::DiscoveryRule => "discovery_rule",
        }
    }

    /// Value written to the `Type` column.
    #[must_use]
    pub const fn type_label(self) -> &'static str {
        match self {
            Self::Item => "Unsupported Item",
            Self::DiscoveryRule => "Unsupported Discovery Rule",
        }
    }

    /// Plural form used in report file names.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Item => "items",
            Self::DiscoveryRule => "discovery_rules",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GroupBy
// ---------------------------------------------------------------------------

/// Which group spaces an audit run enumerates and reports.
///
/// Host-keyed and template-keyed findings are never merged: `Both` yields two
/// independent group spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum GroupBy {
    #[default]
    Host,
    Template,
    Both,
}

impl GroupBy {
    /// Group spaces covered, in enumeration order (templates before hosts).
    #[must_use]
    pub const fn spaces(self) -> &'static [EntityKind] {
        match self {
            Self::Host => &[EntityKind::Host],
            Self::Template => &[EntityKind::Template],
            Self::Both => &[EntityKind::Template, EntityKind::Host],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Template => "template",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "host" | "hosts" => Ok(Self::Host),
            "template" | "templates" => Ok(Self::Template),
            "both" | "all" => Ok(Self::Both),
            _ => Err(CoreError::UnknownVariant {
                field: "group-by",
                value: s.to_string(),
                expected: "host, template, both",
            }),
        }
    }
}

impl TryFrom<String> for GroupBy {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// ReportLayout
// ---------------------------------------------------------------------------

/// How findings of one group space are split across report files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ReportLayout {
    /// One file per record kind (items, discovery rules).
    #[default]
    PerKind,
    /// A single file holding every record kind.
    Combined,
}

impl ReportLayout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerKind => "per-kind",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for ReportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "per-kind" | "split" => Ok(Self::PerKind),
            "combined" | "single" => Ok(Self::Combined),
            _ => Err(CoreError::UnknownVariant {
                field: "layout",
                value: s.to_string(),
                expected: "per-kind, combined",
            }),
        }
    }
}

impl TryFrom<String> for ReportLayout {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn normalize_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_enumerates_templates_before_hosts() {
        assert_eq!(
            GroupBy::Both.spaces(),
            &[EntityKind::Template, EntityKind::Host]
        );
    }

    #[test]
    fn group_by_parses_aliases() {
        assert_eq!("HOST".parse::<GroupBy>().unwrap(), GroupBy::Host);
        assert_eq!("templates".parse::<GroupBy>().unwrap(), GroupBy::Template);
        assert_eq!(" both ".parse::<GroupBy>().unwrap(), GroupBy::Both);
    }

    #[test]
    fn group_by_rejects_unknown() {
        let err = "cluster".parse::<GroupBy>().unwrap_err();
        assert!(err.to_string().contains("invalid group-by 'cluster'"));
    }

    #[test]
    fn layout_accepts_underscore_and_hyphen() {
        assert_eq!("per_kind".parse::<ReportLayout>().unwrap(), ReportLayout::PerKind);
        assert_eq!("per-kind".parse::<ReportLayout>().unwrap(), ReportLayout::PerKind);
        assert_eq!("combined".parse::<ReportLayout>().unwrap(), ReportLayout::Combined);
        assert!("merged".parse::<ReportLayout>().is_err());
    }

    #[test]
    fn serde_matches_from_str_spelling() {
        let layout: ReportLayout = serde_json::from_str("\"per-kind\"").unwrap();
        assert_eq!(layout, ReportLayout::PerKind);
        assert_eq!(serde_json::to_string(&GroupBy::Both).unwrap(), "\"both\"");
    }

    #[test]
    fn deserialize_accepts_the_same_aliases_as_from_str() {
        let layout: ReportLayout = serde_json::from_str("\"per_kind\"").unwrap();
        assert_eq!(layout, ReportLayout::PerKind);
        let layout: ReportLayout = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(layout, ReportLayout::Combined);
        let group_by: GroupBy = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(group_by, GroupBy::Both);

        let err = serde_json::from_str::<GroupBy>("\"cluster\"").unwrap_err();
        assert!(err.to_string().contains("invalid group-by 'cluster'"));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::Template), "template");
        assert_eq!(format!("{}", RecordKind::DiscoveryRule), "discovery_rule");
        assert_eq!(format!("{}", GroupBy::Host), "host");
        assert_eq!(format!("{}", ReportLayout::Combined), "combined");
    }

    #[test]
    fn type_labels_match_report_vocabulary() {
        assert_eq!(RecordKind::Item.type_label(), "Unsupported Item");
        assert_eq!(
            RecordKind::DiscoveryRule.type_label(),
            "Unsupported Discovery Rule"
        );
        assert_eq!(EntityKind::Host.group_label(), "Host");
    }
}
