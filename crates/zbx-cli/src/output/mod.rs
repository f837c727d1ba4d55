use serde::Serialize;
use zbx_core::responses::AuditSummary;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_table};

fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Raw => serde_json::to_string(value)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(value)?,
    })
}

/// Render the run summary in the requested format.
pub fn render_summary(summary: &AuditSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let prefs = ui::prefs();
            Ok(summary_table(
                summary,
                TableOptions {
                    max_width: prefs.term_width,
                    color: prefs.table_color,
                },
            ))
        }
        OutputFormat::Json | OutputFormat::Raw => render_json(summary, format),
    }
}

/// Print the run summary to stdout.
pub fn output_summary(summary: &AuditSummary, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_summary(summary, format)?;
    println!("{rendered}");
    Ok(())
}

fn summary_table(summary: &AuditSummary, options: TableOptions) -> String {
    let overview = [
        ("endpoint", summary.endpoint.clone()),
        ("group_by", summary.group_by.to_string()),
        ("layout", summary.layout.to_string()),
        ("hosts_checked", summary.hosts_checked.to_string()),
        ("templates_checked", summary.templates_checked.to_string()),
        ("unsupported_items", summary.unsupported_items.to_string()),
        (
            "unsupported_discovery_rules",
            summary.unsupported_discovery_rules.to_string(),
        ),
        ("unsupported_total", summary.total_findings().to_string()),
    ]
    .into_iter()
    .map(|(key, value)| vec![key.to_string(), value])
    .collect::<Vec<_>>();

    let files = summary
        .files
        .iter()
        .map(|file| {
            vec![
                file.path.clone(),
                file.group_space.to_string(),
                file.kind.map_or_else(|| "all".to_string(), |kind| kind.to_string()),
                file.rows.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut out = render_table(&["key", "value"], &overview, options);
    out.push_str("\n\n");
    if files.is_empty() {
        out.push_str("(no report files)");
    } else {
        out.push_str(&render_table(&["path", "group", "kind", "rows"], &files, options));
    }
    out
}
