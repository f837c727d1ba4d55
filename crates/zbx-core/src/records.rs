//! Monitored entities and the unsupported findings they own.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordKind};
use crate::normalize::normalize;

/// A host or template snapshot fetched from the monitoring platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredEntity {
    /// Opaque platform identifier (`hostid` / `templateid`).
    pub id: String,
    /// Display name, used as the report group key.
    pub name: String,
    pub kind: EntityKind,
}

impl MonitoredEntity {
    #[must_use]
    pub fn host(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntityKind::Host,
        }
    }

    #[must_use]
    pub fn template(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntityKind::Template,
        }
    }
}

/// An item or discovery rule currently in the unsupported state.
///
/// `error` is kept exactly as the platform reported it. An empty string means
/// the platform sent no error text; it is never replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedRecord {
    pub kind: RecordKind,
    /// Name of the owning host or template.
    pub owner: String,
    /// Display name of the item or discovery rule.
    pub name: String,
    /// Raw error text.
    pub error: String,
}

impl UnsupportedRecord {
    #[must_use]
    pub fn new(
        kind: RecordKind,
        owner: impl Into<String>,
        name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            owner: owner.into(),
            name: name.into(),
            error: error.into(),
        }
    }

    /// Normalize the error text, producing a record safe for one report line.
    #[must_use]
    pub fn normalized(self) -> NormalizedRecord {
        NormalizedRecord {
            error: normalize(&self.error),
            kind: self.kind,
            owner: self.owner,
            name: self.name,
        }
    }
}

/// An [`UnsupportedRecord`] whose error text has been normalized.
///
/// Only constructible through [`UnsupportedRecord::normalized`], so the error
/// text never contains a line break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    kind: RecordKind,
    owner: String,
    name: String,
    error: String,
}

impl NormalizedRecord {
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl From<UnsupportedRecord> for NormalizedRecord {
    fn from(record: UnsupportedRecord) -> Self {
        record.normalized()
    }
}
