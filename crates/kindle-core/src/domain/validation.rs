//! Tree walker.
//!
//! Entities implement [`Validate`] for their own rules (paths relative to
//! the entity) and [`Walk`] to declare their children. The [`Walker`]
//! visits the tree depth-first in declaration order, re-roots every
//! entity's findings at the current [`ContextPath`] and never stops early.

use tracing::{debug, trace};

use super::report::{ContextPath, Report};

/// Entity-level validation.
pub trait Validate {
    /// Findings for this entity alone, with paths relative to it.
    fn validate(&self) -> Report {
        Report::new()
    }
}

/// Structural traversal: which children an entity has.
pub trait Walk: Validate {
    /// Hand every child to `walker`. Leaves keep the default.
    fn walk(&self, _walker: &mut Walker) {}
}

/// Depth-first traversal state.
#[derive(Debug, Default)]
pub struct Walker {
    path: ContextPath,
    report: Report,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `node` at the current path, then descend into its children.
    pub fn visit<T: Walk + ?Sized>(&mut self, node: &T) {
        let found = node.validate();
        if !found.is_empty() {
            trace!(path = %self.path, findings = found.len(), "entity findings");
        }
        self.report.merge_under(&self.path, found);
        node.walk(self);
    }

    /// A required child struct.
    pub fn field<T: Walk + ?Sized>(&mut self, name: &'static str, node: &T) {
        self.path.push(name);
        self.visit(node);
        self.path.pop();
    }

    /// An optional child struct; absence is not a finding.
    pub fn optional<T: Walk>(&mut self, name: &'static str, node: Option<&T>) {
        if let Some(node) = node {
            self.field(name, node);
        }
    }

    /// An ordered collection; each element is visited under its index.
    pub fn list<T: Walk>(&mut self, name: &'static str, items: &[T]) {
        if items.is_empty() {
            return;
        }
        self.path.push(name);
        for (index, item) in items.iter().enumerate() {
            self.path.push(index);
            self.visit(item);
            self.path.pop();
        }
        self.path.pop();
    }

    pub fn finish(self) -> Report {
        self.report
    }
}

/// Validate a whole document tree and return its report.
pub fn validate_config<T: Walk + ?Sized>(root: &T) -> Report {
    let mut walker = Walker::new();
    walker.visit(root);
    let report = walker.finish();
    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context_path;
    use crate::domain::ValidationKind;

    struct Leaf {
        bad: bool,
    }

    impl Validate for Leaf {
        fn validate(&self) -> Report {
            let mut report = Report::new();
            if self.bad {
                report.error("value", ValidationKind::PathRelative);
            }
            report
        }
    }

    impl Walk for Leaf {}

    struct Branch {
        first: Leaf,
        maybe: Option<Leaf>,
        items: Vec<Leaf>,
    }

    impl Validate for Branch {
        fn validate(&self) -> Report {
            Report::from_kind(ValidationKind::VersionRequired, crate::domain::Severity::Warning)
        }
    }

    impl Walk for Branch {
        fn walk(&self, walker: &mut Walker) {
            walker.field("first", &self.first);
            walker.optional("maybe", self.maybe.as_ref());
            walker.list("items", &self.items);
        }
    }

    #[test]
    fn findings_follow_declaration_order_with_paths() {
        let tree = Branch {
            first: Leaf { bad: true },
            maybe: Some(Leaf { bad: true }),
            items: vec![Leaf { bad: false }, Leaf { bad: true }],
        };

        let report = validate_config(&tree);
        let paths: Vec<ContextPath> = report.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                ContextPath::root(),
                context_path!["first", "value"],
                context_path!["maybe", "value"],
                context_path!["items", 1, "value"],
            ]
        );
    }

    #[test]
    fn absent_optional_is_skipped() {
        let tree = Branch {
            first: Leaf { bad: false },
            maybe: None,
            items: Vec::new(),
        };
        let report = validate_config(&tree);
        assert_eq!(report.len(), 1);
        assert!(!report.is_fatal());
    }

    #[test]
    fn walking_twice_is_identical() {
        let tree = Branch {
            first: Leaf { bad: true },
            maybe: None,
            items: vec![Leaf { bad: true }, Leaf { bad: true }],
        };
        assert_eq!(validate_config(&tree), validate_config(&tree));
    }
}
