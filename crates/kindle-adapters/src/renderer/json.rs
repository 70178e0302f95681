//! JSON renderer.

use serde::Serialize;

use kindle_core::{
    application::{ApplicationError, Outcome, ports::ReportRenderer},
    domain::{DocumentId, Entry},
    error::KindleResult,
};

/// Machine-readable output: one object per document plus a summary.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    pretty: bool,
    show_warnings: bool,
}

#[derive(Serialize)]
struct Rendered<'a> {
    documents: Vec<DocumentView<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct DocumentView<'a> {
    document: &'a DocumentId,
    valid: bool,
    errors: usize,
    warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<&'a Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
}

#[derive(Serialize)]
struct Summary {
    documents: usize,
    passed: usize,
    failed: usize,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self {
            pretty: true,
            show_warnings: true,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn show_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }

    fn view<'a>(&self, outcome: &'a Outcome) -> DocumentView<'a> {
        let entries: Vec<&Entry> = outcome
            .report()
            .map(|report| {
                report
                    .iter()
                    .filter(|e| self.show_warnings || e.is_error())
                    .collect()
            })
            .unwrap_or_default();

        DocumentView {
            document: &outcome.id,
            valid: outcome.passed(),
            errors: outcome.error_count(),
            warnings: outcome.warning_count(),
            entries,
            load_error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, outcomes: &[Outcome]) -> KindleResult<String> {
        let documents: Vec<DocumentView<'_>> = outcomes.iter().map(|o| self.view(o)).collect();
        let passed = documents.iter().filter(|d| d.valid).count();
        let rendered = Rendered {
            summary: Summary {
                documents: documents.len(),
                passed,
                failed: documents.len() - passed,
            },
            documents,
        };

        let text = if self.pretty {
            serde_json::to_string_pretty(&rendered)
        } else {
            serde_json::to_string(&rendered)
        };
        text.map_err(|e| {
            ApplicationError::RenderingFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
