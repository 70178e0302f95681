use serde::{Deserialize, Serialize};

use crate::context_path;
use crate::domain::{
    error::ValidationKind,
    report::Report,
    rules::{duplicate_indices, non_empty, validate_version},
    validation::{Validate, Walk, Walker},
};

use super::{
    disk::Disk,
    filesystem::Filesystem,
    node::{Directory, File, Link},
    passwd::Passwd,
    systemd::Systemd,
};

/// Root of a provisioning document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignition: Ignition,
    pub storage: Storage,
    pub systemd: Systemd,
    pub passwd: Passwd,
}

impl Validate for Config {}

impl Walk for Config {
    fn walk(&self, walker: &mut Walker) {
        walker.field("ignition", &self.ignition);
        walker.field("storage", &self.storage);
        walker.field("systemd", &self.systemd);
        walker.field("passwd", &self.passwd);
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ignition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Validate for Ignition {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        match non_empty(&self.version) {
            Some(version) => report.check("version", validate_version(version)),
            None => report.warning("version", ValidationKind::VersionRequired),
        }
        report
    }
}

impl Walk for Ignition {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<Disk>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filesystems: Vec<Filesystem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<Directory>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Storage {
    /// Files, directories and links share one path namespace.
    fn node_paths(&self) -> Vec<(&'static str, usize, &str)> {
        let files = self.files.iter().map(|f| f.node.path.as_str());
        let dirs = self.directories.iter().map(|d| d.node.path.as_str());
        let links = self.links.iter().map(|l| l.node.path.as_str());

        files
            .enumerate()
            .map(|(i, p)| ("files", i, p))
            .chain(dirs.enumerate().map(|(i, p)| ("directories", i, p)))
            .chain(links.enumerate().map(|(i, p)| ("links", i, p)))
            .collect()
    }
}

impl Validate for Storage {
    fn validate(&self) -> Report {
        let mut report = Report::new();

        for i in duplicate_indices(self.disks.iter().map(|d| d.device.as_str())) {
            report.error(context_path!["disks", i, "device"], ValidationKind::Duplicate);
        }
        for i in duplicate_indices(self.filesystems.iter().map(|f| f.device.as_str())) {
            report.error(context_path!["filesystems", i, "device"], ValidationKind::Duplicate);
        }

        let nodes = self.node_paths();
        for pos in duplicate_indices(nodes.iter().map(|&(_, _, path)| path)) {
            let (list, i, _) = nodes[pos];
            report.error(context_path![list, i, "path"], ValidationKind::Duplicate);
        }

        report
    }
}

impl Walk for Storage {
    fn walk(&self, walker: &mut Walker) {
        walker.list("disks", &self.disks);
        walker.list("filesystems", &self.filesystems);
        walker.list("files", &self.files);
        walker.list("directories", &self.directories);
        walker.list("links", &self.links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::node::Node;

    #[test]
    fn missing_version_is_a_warning() {
        let report = Ignition::default().validate();
        assert_eq!(report.kinds(), vec![ValidationKind::VersionRequired]);
        assert!(!report.is_fatal());
    }

    #[test]
    fn malformed_version_is_an_error() {
        let report = Ignition { version: Some("three".into()) }.validate();
        assert!(report.is_fatal());
    }

    #[test]
    fn node_paths_share_a_namespace() {
        let storage = Storage {
            files: vec![File { node: Node::new("/etc/app"), ..Default::default() }],
            directories: vec![Directory { node: Node::new("/etc/app"), mode: Some(0o755) }],
            links: vec![Link {
                node: Node::new("/etc/app"),
                target: Some("/opt/app".into()),
                hard: None,
            }],
            ..Default::default()
        };
        let paths: Vec<String> = storage.validate().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["$.directories.0.path", "$.links.0.path"]);
    }

    #[test]
    fn duplicate_filesystem_devices() {
        let fs = |device: &str| Filesystem {
            device: device.into(),
            format: Some("ext4".into()),
            ..Default::default()
        };
        let storage = Storage {
            filesystems: vec![fs("/dev/sda1"), fs("/dev/sda1")],
            ..Default::default()
        };
        assert_eq!(storage.validate().kinds(), vec![ValidationKind::Duplicate]);
    }
}
