//! Integration tests for kindle-core.
//!
//! Documents are deserialized from JSON the way an adapter would, then run
//! through the public API only.

use kindle_core::domain::{Config, Severity, ValidationKind, validate_config};
use kindle_core::prelude::*;

fn parse(json: &str) -> Config {
    serde_json::from_str(json).expect("fixture should deserialize")
}

fn findings(report: &Report) -> Vec<(String, ValidationKind, Severity)> {
    report
        .iter()
        .map(|e| (e.path.to_string(), e.kind, e.severity))
        .collect()
}

#[test]
fn test_clean_document_has_no_findings() {
    let config = parse(
        r#"{
            "ignition": { "version": "3.4.0" },
            "storage": {
                "disks": [{
                    "device": "/dev/sda",
                    "partitions": [
                        { "number": 1, "label": "root", "startMiB": 0, "sizeMiB": 1024 },
                        { "number": 2, "label": "var", "startMiB": 1024, "sizeMiB": 2048 }
                    ]
                }],
                "filesystems": [
                    { "device": "/dev/sda1", "format": "ext4", "path": "/", "label": "root" }
                ],
                "directories": [{ "path": "/srv", "mode": 493 }],
                "links": [{ "path": "/etc/localtime", "target": "/usr/share/zoneinfo/UTC" }]
            },
            "systemd": {
                "units": [{ "name": "app.service", "enabled": true, "contents": "[Service]\nExecStart=/bin/app" }]
            },
            "passwd": {
                "users": [{ "name": "core", "homeDir": "/home/core" }],
                "groups": [{ "name": "wheel" }]
            }
        }"#,
    );

    let report = validate_config(&config);
    assert!(report.is_empty(), "unexpected findings: {report}");
}

#[test]
fn test_findings_carry_full_paths_in_walk_order() {
    let config = parse(
        r#"{
            "ignition": { "version": "3.4.0" },
            "storage": {
                "filesystems": [
                    { "device": "/dev/sda1", "format": "ext4" },
                    { "device": "/dev/sdb1", "path": "/var" }
                ],
                "directories": [{ "path": "relative/dir", "mode": 493 }]
            },
            "systemd": {
                "units": [{ "name": "broken", "contents": "[Unit]" }]
            }
        }"#,
    );

    let report = validate_config(&config);
    assert_eq!(
        findings(&report),
        vec![
            (
                "$.storage.filesystems.1.format".to_string(),
                ValidationKind::FormatNilWithOthers,
                Severity::Error
            ),
            (
                "$.storage.directories.0.path".to_string(),
                ValidationKind::PathRelative,
                Severity::Error
            ),
            (
                "$.systemd.units.0.name".to_string(),
                ValidationKind::InvalidSystemdExt,
                Severity::Error
            ),
        ]
    );
}

#[test]
fn test_warnings_do_not_make_a_report_fatal() {
    let config = parse(
        r#"{
            "storage": { "directories": [{ "path": "/srv" }] }
        }"#,
    );

    let report = validate_config(&config);
    assert!(!report.is_fatal());
    assert_eq!(report.warning_count(), 2);
    assert_eq!(
        report.kinds(),
        vec![ValidationKind::VersionRequired, ValidationKind::PermissionsUnset]
    );
}

#[test]
fn test_shared_node_namespace_reports_the_later_entry() {
    let config = parse(
        r#"{
            "ignition": { "version": "3.4.0" },
            "storage": {
                "files": [{ "path": "/etc/motd", "mode": 420 }],
                "links": [{ "path": "/etc/motd", "target": "/etc/issue" }]
            }
        }"#,
    );

    let report = validate_config(&config);
    let duplicates: Vec<String> = report
        .iter()
        .filter(|e| e.kind == ValidationKind::Duplicate)
        .map(|e| e.path.to_string())
        .collect();
    assert_eq!(duplicates, vec!["$.storage.links.0.path"]);
}

#[test]
fn test_report_serializes_codes_and_paths() {
    let config = parse(
        r#"{
            "ignition": { "version": "3.4.0" },
            "storage": { "filesystems": [{ "device": "/dev/sdb1", "path": "/var" }] }
        }"#,
    );

    let json = serde_json::to_value(validate_config(&config)).unwrap();
    let entry = &json["entries"][0];
    assert_eq!(entry["severity"], "error");
    assert_eq!(entry["kind"], "format_nil_with_others");
    assert_eq!(
        entry["path"],
        serde_json::json!(["storage", "filesystems", 0, "format"])
    );
}

#[test]
fn test_validation_is_repeatable() {
    let config = parse(
        r#"{
            "storage": {
                "disks": [{
                    "device": "/dev/sda",
                    "partitions": [
                        { "number": 1, "startMiB": 0, "sizeMiB": 100 },
                        { "number": 1, "startMiB": 50, "sizeMiB": 100 }
                    ]
                }]
            }
        }"#,
    );

    let first = validate_config(&config);
    let second = validate_config(&config);
    assert_eq!(findings(&first), findings(&second));
    assert!(first.kinds().contains(&ValidationKind::DuplicatePartitionNumber));
    assert!(first.kinds().contains(&ValidationKind::PartitionsOverlap));
}
