//! Unsupported item and discovery-rule lookup for one owning entity.
//!
//! Only rows whose `state` is the not-supported code are returned. As with
//! hosts, the state filter is sent to the server and re-checked locally.

use serde::Deserialize;
use serde_json::{Value, json};
use zbx_core::enums::{EntityKind, RecordKind};
use zbx_core::{MonitoredEntity, UnsupportedRecord};

use crate::{ApiClient, ApiError, STATE_NOT_SUPPORTED, Session};

#[derive(Deserialize)]
struct ChildRow {
    name: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, deserialize_with = "crate::rpc::flag")]
    state: Option<String>,
}

impl ApiClient {
    /// Unsupported items owned by `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the result cannot be parsed.
    pub async fn unsupported_items_of(
        &self,
        session: &Session,
        entity: &MonitoredEntity,
    ) -> Result<Vec<UnsupportedRecord>, ApiError> {
        self.unsupported_children(session, entity, RecordKind::Item).await
    }

    /// Unsupported low-level discovery rules owned by `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the result cannot be parsed.
    pub async fn unsupported_discovery_rules_of(
        &self,
        session: &Session,
        entity: &MonitoredEntity,
    ) -> Result<Vec<UnsupportedRecord>, ApiError> {
        self.unsupported_children(session, entity, RecordKind::DiscoveryRule)
            .await
    }

    async fn unsupported_children(
        &self,
        session: &Session,
        entity: &MonitoredEntity,
        kind: RecordKind,
    ) -> Result<Vec<UnsupportedRecord>, ApiError> {
        let method = match kind {
            RecordKind::Item => "item.get",
            RecordKind::DiscoveryRule => "discoveryrule.get",
        };
        let rows: Vec<ChildRow> = self
            .call(method, &child_params(entity), Some(session))
            .await?;
        let records = unsupported_records(entity, kind, rows);
        if !records.is_empty() {
            tracing::debug!(
                owner = %entity.name,
                kind = %kind,
                count = records.len(),
                "unsupported entities found"
            );
        }
        Ok(records)
    }
}

fn child_params(entity: &MonitoredEntity) -> Value {
    let owner_field = match entity.kind {
        EntityKind::Host => "hostids",
        EntityKind::Template => "templateids",
    };
    let mut params = json!({
        "output": ["itemid", "name", "error", "state"],
        "filter": { "state": STATE_NOT_SUPPORTED },
    });
    params[owner_field] = Value::String(entity.id.clone());
    params
}

fn unsupported_records(
    entity: &MonitoredEntity,
    kind: RecordKind,
    rows: Vec<ChildRow>,
) -> Vec<UnsupportedRecord> {
    rows.into_iter()
        .filter(|row| row.state.as_deref() == Some(STATE_NOT_SUPPORTED))
        .map(|row| {
            if row.error.as_deref().is_none_or(str::is_empty) {
                tracing::debug!(
                    owner = %entity.name,
                    name = %row.name,
                    "unsupported without error text"
                );
            }
            UnsupportedRecord::new(kind, &entity.name, row.name, row.error.unwrap_or_default())
        })
        .collect()
}
