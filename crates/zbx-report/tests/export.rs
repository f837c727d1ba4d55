use std::fs;

use pretty_assertions::assert_eq;
use zbx_core::enums::{EntityKind, RecordKind, ReportLayout};
use zbx_core::{GroupSpace, ReportGroups, UnsupportedRecord, aggregate};
use zbx_report::{ReportError, export, write_reports};

fn item(owner: &str, name: &str, error: &str) -> (String, UnsupportedRecord) {
    (
        owner.to_string(),
        UnsupportedRecord::new(RecordKind::Item, owner, name, error),
    )
}

fn rule(owner: &str, name: &str, error: &str) -> (String, UnsupportedRecord) {
    (
        owner.to_string(),
        UnsupportedRecord::new(RecordKind::DiscoveryRule, owner, name, error),
    )
}

#[test]
fn writes_header_then_rows_in_group_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let groups = aggregate([
        item("web01", "cpu.load", "timeout\nwaiting"),
        item("web02", "disk.free", "no such device"),
        rule("web01", "net.if.discovery", "agent unavailable"),
    ]);

    let rows = export(&groups, &path, "Host").unwrap();

    assert_eq!(rows, 3);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Host,Type,Name,Error\n\
         web01,Unsupported Item,cpu.load,timeout waiting\n\
         web01,Unsupported Discovery Rule,net.if.discovery,agent unavailable\n\
         web02,Unsupported Item,disk.free,no such device\n"
    );
}

#[test]
fn empty_groups_write_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let rows = export(&ReportGroups::new(), &path, "Template").unwrap();

    assert_eq!(rows, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "Template,Type,Name,Error\n");
}

#[test]
fn quotes_fields_with_delimiters_and_keeps_unicode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quoted.csv");
    let groups = aggregate([item(
        "srv, east",
        "disk \"C:\"",
        "Значение не поддерживается",
    )]);

    export(&groups, &path, "Host").unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(
        row.iter().collect::<Vec<_>>(),
        vec![
            "srv, east",
            "Unsupported Item",
            "disk \"C:\"",
            "Значение не поддерживается"
        ]
    );
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"srv, east\""));
    assert!(raw.contains("\"disk \"\"C:\"\"\""));
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    fs::write(&path, "stale contents from an earlier run\n".repeat(20)).unwrap();

    export(&aggregate([item("web01", "cpu.load", "timeout")]), &path, "Host").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn unwritable_destination_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.csv");

    let err = export(&ReportGroups::new(), &path, "Host").unwrap_err();

    assert!(matches!(err, ReportError::Write { .. }));
    assert!(err.to_string().contains("report.csv"));
}

#[test]
fn write_reports_creates_output_dir_and_every_planned_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    let mut host = GroupSpace::new(EntityKind::Host);
    host.groups
        .extend([item("web01", "cpu.load", "timeout waiting")]);
    let template = GroupSpace::new(EntityKind::Template);

    let files = write_reports(&[template, host], ReportLayout::PerKind, &out).unwrap();

    let summary: Vec<(String, usize)> = files
        .iter()
        .map(|f| {
            let name = std::path::Path::new(&f.path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, f.rows)
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("zabbix_unsupported_items_by_template.csv".to_string(), 0),
            ("zabbix_unsupported_discovery_rules_by_template.csv".to_string(), 0),
            ("zabbix_unsupported_items_by_host.csv".to_string(), 1),
            ("zabbix_unsupported_discovery_rules_by_host.csv".to_string(), 0),
        ]
    );
    assert_eq!(
        fs::read_to_string(out.join("zabbix_unsupported_items_by_host.csv")).unwrap(),
        "Host,Type,Name,Error\nweb01,Unsupported Item,cpu.load,timeout waiting\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("zabbix_unsupported_discovery_rules_by_template.csv")).unwrap(),
        "Template,Type,Name,Error\n"
    );
}
