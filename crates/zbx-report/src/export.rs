//! Grouped findings → CSV.

use std::path::Path;

use zbx_core::ReportGroups;

use crate::ReportError;

/// Fixed columns after the group column.
pub const COLUMNS: [&str; 3] = ["Type", "Name", "Error"];

/// Write `groups` to `destination` as CSV and return the number of data rows.
///
/// The header is `<group_column_label>,Type,Name,Error`. Rows follow group
/// order, then record order inside each group. An existing file is
/// replaced; an empty `groups` still produces the header line.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the file cannot be created or written.
pub fn export(
    groups: &ReportGroups,
    destination: &Path,
    group_column_label: &str,
) -> Result<usize, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(destination)
        .map_err(|e| ReportError::write(destination, e))?;

    let mut header = Vec::with_capacity(COLUMNS.len() + 1);
    header.push(group_column_label);
    header.extend(COLUMNS);
    writer
        .write_record(&header)
        .map_err(|e| ReportError::write(destination, e))?;

    let mut rows = 0;
    for group in groups {
        for record in &group.records {
            writer
                .write_record([
                    group.key.as_str(),
                    record.kind().type_label(),
                    record.name(),
                    record.error(),
                ])
                .map_err(|e| ReportError::write(destination, e))?;
            rows += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| ReportError::write(destination, e))?;
    tracing::debug!(path = %destination.display(), rows, "report written");
    Ok(rows)
}
