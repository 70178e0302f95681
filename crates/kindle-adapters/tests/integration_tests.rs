//! End-to-end tests: documents on disk through the validation service.

use std::{fs, path::PathBuf};

use kindle_adapters::{JsonRenderer, LocalSource, MemorySource, PlainRenderer};
use kindle_core::{
    application::{ReportRenderer, ValidationService},
    domain::ValidationKind,
};
use tempfile::TempDir;

const VALID: &str = r#"{
    "ignition": { "version": "3.4.0" },
    "storage": {
        "filesystems": [{ "device": "/dev/sda1", "format": "xfs", "label": "data" }]
    }
}"#;

const INVALID_TOML: &str = r#"
[ignition]
version = "3.4.0"

[[storage.filesystems]]
device = "/dev/sdb1"
format = "vfat"
label = "WAY_TOO_LONG_LABEL"
"#;

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a-valid.json"), VALID).unwrap();
    fs::write(tmp.path().join("b-invalid.toml"), INVALID_TOML).unwrap();
    fs::write(tmp.path().join("c-broken.ign"), "{ not json").unwrap();
    fs::write(tmp.path().join("README.md"), "# not a document").unwrap();
    tmp
}

#[test]
fn test_directory_validation_workflow() {
    let tmp = fixture();
    let service = ValidationService::new(Box::new(LocalSource::new()));

    let ids = service.discover(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(ids.len(), 3);

    let outcomes = service.validate_all(&ids);
    assert!(outcomes[0].passed());

    let invalid = outcomes[1].report().unwrap();
    assert_eq!(invalid.kinds(), vec![ValidationKind::VfatLabelTooLong]);
    assert_eq!(
        invalid.entries()[0].path.to_string(),
        "$.storage.filesystems.0.label"
    );

    assert!(outcomes[2].result.is_err());
}

#[test]
fn test_renderers_agree_on_the_summary() {
    let tmp = fixture();
    let service = ValidationService::new(Box::new(LocalSource::new()));
    let ids = service.discover(&[tmp.path().to_path_buf()]).unwrap();
    let outcomes = service.validate_all(&ids);

    let plain = PlainRenderer::new().render(&outcomes).unwrap();
    assert!(plain.contains("3 documents checked: 1 passed, 2 failed"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonRenderer::new().render(&outcomes).unwrap()).unwrap();
    assert_eq!(json["summary"]["passed"], 1);
    assert_eq!(json["summary"]["failed"], 2);
}

#[test]
fn test_memory_source_behaves_like_disk() {
    let source = MemorySource::new()
        .with("/docs/ok.json", VALID)
        .unwrap()
        .with("/docs/bad.toml", INVALID_TOML)
        .unwrap();
    let service = ValidationService::new(Box::new(source));

    let ids = service.discover(&[PathBuf::from("/docs")]).unwrap();
    let outcomes = service.validate_all(&ids);

    // BTreeMap order: bad.toml sorts before ok.json
    assert!(!outcomes[0].passed());
    assert!(outcomes[1].passed());
}
