//! Which report files a run writes, and writing them.
//!
//! `per-kind` yields one file per record kind per group space, `combined`
//! one file per group space. Every planned file is written, header-only
//! when it has no rows.

use std::path::{Path, PathBuf};

use zbx_core::enums::{RecordKind, ReportLayout};
use zbx_core::responses::ReportFileSummary;
use zbx_core::{GroupSpace, ReportGroups};

use crate::{ReportError, export};

/// One report file to be written.
#[derive(Debug, Clone)]
pub struct PlannedReport<'a> {
    pub path: PathBuf,
    pub space: &'a GroupSpace,
    /// `None` for a combined file.
    pub kind: Option<RecordKind>,
}

impl PlannedReport<'_> {
    fn groups(&self) -> ReportGroups {
        match self.kind {
            Some(kind) => self.space.groups.only_kind(kind),
            None => self.space.groups.clone(),
        }
    }
}

/// File name for one report, e.g. `zabbix_unsupported_items_by_host.csv`.
#[must_use]
pub fn file_name(space: &GroupSpace, kind: Option<RecordKind>) -> String {
    let stem = kind.map_or("all", RecordKind::file_stem);
    format!("zabbix_unsupported_{stem}_by_{}.csv", space.kind.as_str())
}

/// Plan the report files for `spaces` under `output_dir`.
#[must_use]
pub fn plan<'a>(
    spaces: &'a [GroupSpace],
    layout: ReportLayout,
    output_dir: &Path,
) -> Vec<PlannedReport<'a>> {
    let kinds: Vec<Option<RecordKind>> = match layout {
        ReportLayout::PerKind => RecordKind::ALL.into_iter().map(Some).collect(),
        ReportLayout::Combined => vec![None],
    };

    spaces
        .iter()
        .flat_map(|space| {
            kinds.iter().map(move |&kind| PlannedReport {
                path: output_dir.join(file_name(space, kind)),
                space,
                kind,
            })
        })
        .collect()
}

/// Write every report for `spaces`, creating `output_dir` if needed.
///
/// # Errors
///
/// Returns [`ReportError`] on the first directory or file that cannot be
/// written. Files written before the failure are left in place.
pub fn write_reports(
    spaces: &[GroupSpace],
    layout: ReportLayout,
    output_dir: &Path,
) -> Result<Vec<ReportFileSummary>, ReportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for report in plan(spaces, layout, output_dir) {
        let rows = export(&report.groups(), &report.path, report.space.kind.group_label())?;
        written.push(ReportFileSummary {
            path: report.path.display().to_string(),
            group_space: report.space.kind,
            kind: report.kind,
            rows,
        });
    }
    Ok(written)
}
