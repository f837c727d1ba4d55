//! The audit run: authenticate → enumerate → aggregate → export.
//!
//! Strictly sequential. Each remote call completes before the next is
//! issued, and the first failure of any kind ends the run. Report files are
//! only written once every requested group space has been enumerated, so a
//! failed run leaves no reports behind.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use zbx_api::{ApiClient, ApiError, ClientOptions, Session};
use zbx_config::{ZbxConfig, endpoint_for};
use zbx_core::enums::{EntityKind, GroupBy, RecordKind, ReportLayout};
use zbx_core::responses::{AuditSummary, ReportFileSummary};
use zbx_core::{GroupSpace, MonitoredEntity};

use crate::progress::Progress;
use crate::prompt::{Credentials, Target};

/// Everything one run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct AuditPlan {
    pub endpoint: String,
    pub credentials: Credentials,
    pub client: ClientOptions,
    pub group_by: GroupBy,
    pub layout: ReportLayout,
    pub output_dir: PathBuf,
}

impl AuditPlan {
    #[must_use]
    pub fn new(target: Target, config: &ZbxConfig) -> Self {
        Self {
            endpoint: endpoint_for(&target.base_url),
            credentials: target.credentials,
            client: ClientOptions {
                timeout: Duration::from_secs(config.api.timeout_secs),
                accept_invalid_certs: config.api.accept_invalid_certs,
                bearer_auth: config.api.bearer_auth,
            },
            group_by: config.report.group_by,
            layout: config.report.layout,
            output_dir: PathBuf::from(&config.report.output_dir),
        }
    }
}

/// Run one audit and write its reports.
pub async fn run(plan: &AuditPlan) -> anyhow::Result<AuditSummary> {
    let client = ApiClient::new(&plan.endpoint, &plan.client)?;
    let session = authenticate(&client, &plan.credentials)
        .await
        .context("authentication failed")?;

    let mut spaces = Vec::new();
    for &kind in plan.group_by.spaces() {
        let space = collect_space(&client, &session, kind)
            .await
            .with_context(|| format!("failed to audit {kind}s"))?;
        spaces.push(space);
    }

    let files = zbx_report::write_reports(&spaces, plan.layout, &plan.output_dir)?;
    for file in &files {
        tracing::info!(path = %file.path, rows = file.rows, "exported");
    }

    Ok(summarize(plan, &spaces, files))
}

async fn authenticate(client: &ApiClient, credentials: &Credentials) -> Result<Session, ApiError> {
    match credentials {
        Credentials::Token(token) => {
            tracing::debug!("using configured API token as session");
            Ok(Session::new(token.clone()))
        }
        Credentials::Password { username, password } => {
            let spinner = Progress::spinner("Authenticating to Zabbix...");
            let session = client.login(username, password).await;
            spinner.finish_clear();
            session
        }
    }
}

async fn collect_space(
    client: &ApiClient,
    session: &Session,
    kind: EntityKind,
) -> Result<GroupSpace, ApiError> {
    let entities = match kind {
        EntityKind::Host => client.enumerate_hosts(session).await?,
        EntityKind::Template => client.enumerate_templates(session).await?,
    };
    tracing::info!(count = entities.len(), kind = %kind, "checking entities");

    let mut space = GroupSpace::new(kind);
    space.entities_checked = entities.len();

    let progress = Progress::entities(kind, entities.len());
    if let Err(error) = scan(client, session, &entities, &mut space, &progress).await {
        progress.finish_err("aborted");
        return Err(error);
    }
    progress.finish_clear();
    Ok(space)
}

async fn scan(
    client: &ApiClient,
    session: &Session,
    entities: &[MonitoredEntity],
    space: &mut GroupSpace,
    progress: &Progress,
) -> Result<(), ApiError> {
    for entity in entities {
        progress.set_message(&entity.name);
        tracing::debug!(entity = %entity.name, kind = %entity.kind, "checking");

        let items = client.unsupported_items_of(session, entity).await?;
        let rules = client.unsupported_discovery_rules_of(session, entity).await?;
        space.groups.extend(
            items
                .into_iter()
                .chain(rules)
                .map(|record| (record.owner.clone(), record)),
        );
        progress.inc();
    }
    Ok(())
}

fn summarize(plan: &AuditPlan, spaces: &[GroupSpace], files: Vec<ReportFileSummary>) -> AuditSummary {
    let checked = |kind: EntityKind| -> usize {
        spaces
            .iter()
            .filter(|space| space.kind == kind)
            .map(|space| space.entities_checked)
            .sum()
    };
    let found = |kind: RecordKind| -> usize {
        spaces.iter().map(|space| space.groups.count_kind(kind)).sum()
    };

    AuditSummary {
        endpoint: plan.endpoint.clone(),
        group_by: plan.group_by,
        layout: plan.layout,
        hosts_checked: checked(EntityKind::Host),
        templates_checked: checked(EntityKind::Template),
        unsupported_items: found(RecordKind::Item),
        unsupported_discovery_rules: found(RecordKind::DiscoveryRule),
        files,
    }
}
