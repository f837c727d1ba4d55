//! Cross-cutting error types for zbx-audit.
//!
//! Transport, remote, and write failures are defined in the crates that
//! produce them (`ApiError`, `ReportError`). They converge in `zbx-cli`
//! through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by core type handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name any variant of the expected enum.
    #[error("invalid {field} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}
