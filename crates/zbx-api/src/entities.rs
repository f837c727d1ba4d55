//! Host and template enumeration.
//!
//! Templates are listed unfiltered. Hosts are restricted to monitored ones
//! (`status = 0`): the filter is sent to the server and re-checked on every
//! returned row, so a disabled host never reaches the report even if the
//! server ignores the filter.

use serde::Deserialize;
use serde_json::json;
use zbx_core::MonitoredEntity;

use crate::{ApiClient, ApiError, HOST_STATUS_MONITORED, Session};

#[derive(Deserialize)]
struct HostRow {
    hostid: String,
    name: String,
    #[serde(default, deserialize_with = "crate::rpc::flag")]
    status: Option<String>,
}

#[derive(Deserialize)]
struct TemplateRow {
    templateid: String,
    name: String,
}

impl ApiClient {
    /// List every template.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the result cannot be parsed.
    pub async fn enumerate_templates(
        &self,
        session: &Session,
    ) -> Result<Vec<MonitoredEntity>, ApiError> {
        let params = json!({
            "output": ["templateid", "name"],
        });
        let rows: Vec<TemplateRow> = self.call("template.get", &params, Some(session)).await?;
        let templates = template_entities(rows);
        tracing::info!(count = templates.len(), "enumerated templates");
        Ok(templates)
    }

    /// List monitored hosts only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the result cannot be parsed.
    pub async fn enumerate_hosts(&self, session: &Session) -> Result<Vec<MonitoredEntity>, ApiError> {
        let params = json!({
            "output": ["hostid", "name", "status"],
            "filter": { "status": HOST_STATUS_MONITORED },
        });
        let rows: Vec<HostRow> = self.call("host.get", &params, Some(session)).await?;
        let received = rows.len();
        let hosts = monitored_hosts(rows);
        if hosts.len() < received {
            tracing::debug!(
                dropped = received - hosts.len(),
                "server returned hosts that are not monitored"
            );
        }
        tracing::info!(count = hosts.len(), "enumerated monitored hosts");
        Ok(hosts)
    }
}

fn template_entities(rows: Vec<TemplateRow>) -> Vec<MonitoredEntity> {
    rows.into_iter()
        .map(|row| MonitoredEntity::template(row.templateid, row.name))
        .collect()
}

fn monitored_hosts(rows: Vec<HostRow>) -> Vec<MonitoredEntity> {
    rows.into_iter()
        .filter(|row| row.status.as_deref() == Some(HOST_STATUS_MONITORED))
        .map(|row| MonitoredEntity::host(row.hostid, row.name))
        .collect()
}
