//! Response types printed by the `zbx-audit` binary.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, GroupBy, RecordKind, ReportLayout};

/// One report file written by a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFileSummary {
    pub path: String,
    pub group_space: EntityKind,
    /// `None` for combined files.
    pub kind: Option<RecordKind>,
    pub rows: usize,
}

/// Summary printed after a successful audit run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditSummary {
    pub endpoint: String,
    pub group_by: GroupBy,
    pub layout: ReportLayout,
    pub hosts_checked: usize,
    pub templates_checked: usize,
    pub unsupported_items: usize,
    pub unsupported_discovery_rules: usize,
    pub files: Vec<ReportFileSummary>,
}

impl AuditSummary {
    #[must_use]
    pub const fn total_findings(&self) -> usize {
        self.unsupported_items + self.unsupported_discovery_rules
    }
}
