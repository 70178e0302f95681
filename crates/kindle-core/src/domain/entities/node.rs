//! Filesystem nodes: files, directories and links.
//!
//! All three share [`Node`] (path, ownership, overwrite). Node rules are
//! merged into each concrete entity's own report, so a file's path finding
//! lands at `files.N.path`, not `files.N.node.path`.

use serde::{Deserialize, Serialize};

use crate::context_path;
use crate::domain::{
    error::ValidationKind,
    report::{ContextPath, Report},
    rules::{
        SUPPORTED_COMPRESSION, non_empty, validate_absolute_path, validate_hash, validate_mode,
        validate_no_special_bits, validate_one_of, validate_url,
    },
    validation::{Validate, Walk, Walker},
};

/// Fields common to every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    pub user: NodeUser,
    pub group: NodeGroup,
}

impl Node {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn validate_path(&self) -> Result<(), ValidationKind> {
        if self.path.is_empty() {
            return Err(ValidationKind::NoPath);
        }
        validate_absolute_path(&self.path)
    }
}

impl Validate for Node {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("path", self.validate_path());
        report
    }
}

impl Walk for Node {
    fn walk(&self, walker: &mut Walker) {
        walker.field("user", &self.user);
        walker.field("group", &self.group);
    }
}

/// Owner of a node, by id or by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for NodeUser {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check(ContextPath::root(), id_xor_name(self.id, &self.name));
        report
    }
}

impl Walk for NodeUser {}

/// Group of a node, by id or by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for NodeGroup {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check(ContextPath::root(), id_xor_name(self.id, &self.name));
        report
    }
}

impl Walk for NodeGroup {}

fn id_xor_name(id: Option<i32>, name: &Option<String>) -> Result<(), ValidationKind> {
    if id.is_some() && non_empty(name).is_some() {
        Err(ValidationKind::BothIdAndNameSet)
    } else {
        Ok(())
    }
}

fn validate_mode_into(report: &mut Report, mode: Option<i32>) {
    match mode {
        Some(mode) => {
            let legal = validate_mode(mode);
            if legal.is_ok() {
                report.advise("mode", validate_no_special_bits(mode));
            }
            report.check("mode", legal);
        }
        None => report.warning("mode", ValidationKind::PermissionsUnset),
    }
}

// ============================================================================
// Files
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct File {
    #[serde(flatten)]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Resource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub append: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<i32>,
}

impl File {
    fn has_data(&self) -> bool {
        self.contents.is_some() || !self.append.is_empty()
    }
}

impl Validate for File {
    fn validate(&self) -> Report {
        let mut report = self.node.validate();
        // A file with no data is only touched; its mode may stay unset.
        if self.has_data() || self.mode.is_some() {
            validate_mode_into(&mut report, self.mode);
        }
        report
    }
}

impl Walk for File {
    fn walk(&self, walker: &mut Walker) {
        self.node.walk(walker);
        walker.optional("contents", self.contents.as_ref());
        walker.list("append", &self.append);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Directory {
    #[serde(flatten)]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<i32>,
}

impl Validate for Directory {
    fn validate(&self) -> Report {
        let mut report = self.node.validate();
        validate_mode_into(&mut report, self.mode);
        report
    }
}

impl Walk for Directory {
    fn walk(&self, walker: &mut Walker) {
        self.node.walk(walker);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    #[serde(flatten)]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard: Option<bool>,
}

impl Link {
    /// Symlinks may be relative; hard links must name an absolute path.
    pub fn validate_target(&self) -> Result<(), ValidationKind> {
        let target = non_empty(&self.target).ok_or(ValidationKind::LinkTargetRequired)?;
        if self.hard == Some(true) {
            validate_absolute_path(target)?;
        }
        Ok(())
    }
}

impl Validate for Link {
    fn validate(&self) -> Report {
        let mut report = self.node.validate();
        report.check("target", self.validate_target());
        report
    }
}

impl Walk for Link {
    fn walk(&self, walker: &mut Walker) {
        self.node.walk(walker);
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Where file data comes from and how to check it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    pub verification: Verification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Resource {
    pub fn validate_source(&self) -> Result<(), ValidationKind> {
        non_empty(&self.source).map_or(Ok(()), validate_url)
    }

    pub fn validate_compression(&self) -> Result<(), ValidationKind> {
        non_empty(&self.compression).map_or(Ok(()), |c| {
            validate_one_of(c, SUPPORTED_COMPRESSION, ValidationKind::CompressionInvalid)
        })
    }

    pub fn validate_hash(&self) -> Result<(), ValidationKind> {
        non_empty(&self.verification.hash).map_or(Ok(()), validate_hash)
    }
}

impl Validate for Resource {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("source", self.validate_source());
        report.check("compression", self.validate_compression());
        report.check(context_path!["verification", "hash"], self.validate_hash());
        report
    }
}

impl Walk for Resource {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::Severity;

    #[test]
    fn node_paths() {
        assert_eq!(Node::new("").validate_path(), Err(ValidationKind::NoPath));
        assert_eq!(Node::new("etc/hosts").validate_path(), Err(ValidationKind::PathRelative));
        assert_eq!(Node::new("/etc/hosts").validate_path(), Ok(()));
    }

    #[test]
    fn file_with_contents_and_no_mode_warns() {
        let file = File {
            node: Node::new("/etc/motd"),
            contents: Some(Resource {
                source: Some("data:,hello".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = file.validate();
        assert_eq!(report.kinds(), vec![ValidationKind::PermissionsUnset]);
        assert_eq!(report.entries()[0].severity, Severity::Warning);
        assert!(!report.is_fatal());
    }

    #[test]
    fn empty_file_without_mode_is_clean() {
        let file = File { node: Node::new("/var/empty"), ..Default::default() };
        assert!(file.validate().is_empty());
    }

    #[test]
    fn illegal_mode_is_error_and_skips_special_bits() {
        let file = File {
            node: Node::new("/etc/x"),
            mode: Some(0o17777),
            ..Default::default()
        };
        assert_eq!(file.validate().kinds(), vec![ValidationKind::IllegalMode]);
    }

    #[test]
    fn setuid_directory_warns() {
        let dir = Directory { node: Node::new("/srv"), mode: Some(0o2775) };
        let report = dir.validate();
        assert_eq!(report.kinds(), vec![ValidationKind::SpecialModeBits]);
        assert!(!report.is_fatal());
    }

    #[test]
    fn links() {
        let link = |target: Option<&str>, hard| Link {
            node: Node::new("/usr/local/bin/tool"),
            target: target.map(str::to_string),
            hard,
        };
        assert_eq!(link(None, None).validate_target(), Err(ValidationKind::LinkTargetRequired));
        assert_eq!(link(Some("../lib/tool"), None).validate_target(), Ok(()));
        assert_eq!(
            link(Some("../lib/tool"), Some(true)).validate_target(),
            Err(ValidationKind::PathRelative)
        );
        assert_eq!(link(Some("/opt/tool"), Some(true)).validate_target(), Ok(()));
    }

    #[test]
    fn owner_by_id_and_name_is_rejected() {
        let user = NodeUser { id: Some(0), name: Some("root".into()) };
        assert_eq!(user.validate().kinds(), vec![ValidationKind::BothIdAndNameSet]);
        assert!(NodeUser { id: Some(0), name: None }.validate().is_empty());
    }

    #[test]
    fn resource_rules() {
        let resource = Resource {
            source: Some("ftp://example.com/x".into()),
            compression: Some("bzip2".into()),
            verification: Verification { hash: Some("sha1-abc".into()) },
        };
        let report = resource.validate();
        assert_eq!(
            report.kinds(),
            vec![
                ValidationKind::InvalidScheme,
                ValidationKind::CompressionInvalid,
                ValidationKind::HashUnrecognized,
            ]
        );
        assert_eq!(report.entries()[2].path, context_path!["verification", "hash"]);
    }

    #[test]
    fn file_deserializes_flattened_node() {
        let file: File = serde_json::from_str(
            r#"{"path": "/etc/hostname", "mode": 420, "user": {"name": "core"}, "contents": {"source": "data:,box"}}"#,
        )
        .unwrap();
        assert_eq!(file.node.path, "/etc/hostname");
        assert_eq!(file.node.user.name.as_deref(), Some("core"));
        assert_eq!(file.mode, Some(0o644));
    }
}
