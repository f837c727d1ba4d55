//! # zbx-report
//!
//! CSV export of grouped unsupported findings.
//!
//! [`export`] writes one [`ReportGroups`](zbx_core::ReportGroups) to one file.
//! [`write_reports`] plans and writes every file of a run according to the
//! configured [`ReportLayout`](zbx_core::enums::ReportLayout).

mod error;
mod export;
mod plan;

pub use error::ReportError;
pub use export::{COLUMNS, export};
pub use plan::{PlannedReport, file_name, plan, write_reports};
