//! Validation report.
//!
//! A [`Report`] is the ordered, exhaustive list of findings for one
//! document. Entries keep insertion order (which is traversal order when the
//! report comes from the walker) and are never deduplicated.

use std::fmt;

use serde::Serialize;

use super::error::ValidationKind;

/// How much a finding matters.
///
/// Only [`Severity::Error`] blocks provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One step from a parent value to a child value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(name: &'static str) -> Self {
        Self::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of a value inside the document, from the root down.
///
/// Displayed as `$.storage.filesystems.0.label`; the root is `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContextPath(Vec<PathSegment>);

impl ContextPath {
    /// The document root.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// `self` followed by every segment of `suffix`.
    pub fn join(&self, suffix: &ContextPath) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + suffix.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&suffix.0);
        Self(segments)
    }
}

impl From<&'static str> for ContextPath {
    fn from(name: &'static str) -> Self {
        Self(vec![PathSegment::Field(name)])
    }
}

impl From<Vec<PathSegment>> for ContextPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for ContextPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Build a [`ContextPath`] from field names and indices.
///
/// ```
/// use kindle_core::context_path;
///
/// let path = context_path!["storage", "filesystems", 0, "label"];
/// assert_eq!(path.to_string(), "$.storage.filesystems.0.label");
/// ```
#[macro_export]
macro_rules! context_path {
    () => {
        $crate::domain::ContextPath::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::domain::ContextPath::from(vec![
            $($crate::domain::PathSegment::from($segment)),+
        ])
    };
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub severity: Severity,
    pub kind: ValidationKind,
    pub message: String,
    pub path: ContextPath,
}

impl Entry {
    pub fn new(severity: Severity, kind: ValidationKind, path: ContextPath) -> Self {
        Self {
            severity,
            kind,
            message: kind.to_string(),
            path,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.path, self.message)
    }
}

/// Ordered collection of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding exactly one root-level entry.
    pub fn from_kind(kind: ValidationKind, severity: Severity) -> Self {
        let mut report = Self::new();
        report.push(Entry::new(severity, kind, ContextPath::root()));
        report
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn error(&mut self, at: impl Into<ContextPath>, kind: ValidationKind) {
        self.push(Entry::new(Severity::Error, kind, at.into()));
    }

    pub fn warning(&mut self, at: impl Into<ContextPath>, kind: ValidationKind) {
        self.push(Entry::new(Severity::Warning, kind, at.into()));
    }

    /// Record a failed field check as an error; a passing check adds nothing.
    pub fn check(&mut self, at: impl Into<ContextPath>, result: Result<(), ValidationKind>) {
        if let Err(kind) = result {
            self.error(at, kind);
        }
    }

    /// Record a failed field check as a warning.
    pub fn advise(&mut self, at: impl Into<ContextPath>, result: Result<(), ValidationKind>) {
        if let Err(kind) = result {
            self.warning(at, kind);
        }
    }

    /// Append every entry of `other`, keeping its order.
    pub fn merge(&mut self, other: Report) {
        self.entries.extend(other.entries);
    }

    /// Append every entry of `other` with `prefix` prepended to its path.
    ///
    /// Child validators report paths relative to themselves; this is how
    /// those paths become document paths.
    pub fn merge_under(&mut self, prefix: &ContextPath, other: Report) {
        self.entries
            .extend(other.entries.into_iter().map(|mut entry| {
                entry.path = prefix.join(&entry.path);
                entry
            }));
    }

    /// Whether any entry blocks provisioning.
    pub fn is_fatal(&self) -> bool {
        self.entries.iter().any(Entry::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Kinds in report order; handy for assertions.
    pub fn kinds(&self) -> Vec<ValidationKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Report {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context_path;

    #[test]
    fn path_display() {
        assert_eq!(ContextPath::root().to_string(), "$");
        assert_eq!(
            context_path!["storage", "files", 3, "path"].to_string(),
            "$.storage.files.3.path"
        );
    }

    #[test]
    fn merge_under_prefixes_paths() {
        let mut child = Report::new();
        child.error("label", ValidationKind::XfsLabelTooLong);
        child.warning(ContextPath::root(), ValidationKind::PermissionsUnset);

        let mut report = Report::new();
        report.merge_under(&context_path!["storage", "filesystems", 1], child);

        let paths: Vec<String> = report.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "$.storage.filesystems.1.label",
                "$.storage.filesystems.1",
            ]
        );
    }

    #[test]
    fn merge_appends_in_order_and_keeps_duplicates() {
        let mut report = Report::new();
        report.warning("mode", ValidationKind::PermissionsUnset);
        assert!(!report.is_fatal());

        let mut other = Report::new();
        other.warning("mode", ValidationKind::PermissionsUnset);
        other.error("path", ValidationKind::PathRelative);
        report.merge(other);

        assert_eq!(
            report.kinds(),
            vec![
                ValidationKind::PermissionsUnset,
                ValidationKind::PermissionsUnset,
                ValidationKind::PathRelative,
            ]
        );
        assert_eq!(report.entries()[2].path, ContextPath::from("path"));
        assert!(report.is_fatal());
    }

    #[test]
    fn warnings_are_not_fatal() {
        let mut report = Report::new();
        report.warning("mode", ValidationKind::PermissionsUnset);
        assert!(!report.is_fatal());
        assert_eq!(report.warning_count(), 1);

        report.error("path", ValidationKind::PathRelative);
        assert!(report.is_fatal());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn check_only_records_failures() {
        let mut report = Report::new();
        report.check("path", Ok(()));
        report.check("path", Err(ValidationKind::PathRelative));
        report.advise("mode", Err(ValidationKind::SpecialModeBits));

        assert_eq!(
            report.kinds(),
            vec![ValidationKind::PathRelative, ValidationKind::SpecialModeBits]
        );
        assert_eq!(report.entries()[1].severity, Severity::Warning);
    }

    #[test]
    fn identical_entries_are_kept() {
        let mut report = Report::new();
        report.error("path", ValidationKind::PathRelative);
        report.error("path", ValidationKind::PathRelative);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn entry_message_comes_from_kind() {
        let entry = Entry::new(
            Severity::Error,
            ValidationKind::NoPath,
            context_path!["storage", "files", 0, "path"],
        );
        assert_eq!(
            entry.to_string(),
            "error at $.storage.files.0.path: path not specified"
        );
    }

    #[test]
    fn serializes_paths_as_segments() {
        let mut report = Report::new();
        report.error(context_path!["passwd", "users", 2, "name"], ValidationKind::UsernameRequired);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["entries"][0]["path"],
            serde_json::json!(["passwd", "users", 2, "name"])
        );
        assert_eq!(json["entries"][0]["kind"], "username_required");
        assert_eq!(json["entries"][0]["severity"], "error");
    }
}
