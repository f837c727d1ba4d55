//! # zbx-core
//!
//! Core types, normalization, and grouping for zbx-audit.
//!
//! This crate holds everything in the audit pipeline that does not touch the
//! network or the filesystem:
//! - Monitored entities (hosts, templates) and unsupported findings
//! - Kind and granularity enums (`EntityKind`, `RecordKind`, `GroupBy`, `ReportLayout`)
//! - Error-text normalization for single-line tabular export
//! - Order-preserving aggregation of findings into report groups
//! - The run summary returned by the CLI

pub mod aggregate;
pub mod enums;
pub mod errors;
pub mod normalize;
pub mod records;
pub mod responses;

pub use aggregate::{GroupSpace, ReportGroup, ReportGroups, aggregate};
pub use errors::CoreError;
pub use normalize::normalize;
pub use records::{MonitoredEntity, NormalizedRecord, UnsupportedRecord};
