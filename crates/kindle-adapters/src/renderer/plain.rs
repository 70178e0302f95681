//! Plain text renderer.

use std::fmt::Write;

use kindle_core::{
    application::{Outcome, ports::ReportRenderer},
    error::{Context, KindleResult},
};

/// Uncolored, line-oriented output suitable for logs and pipes.
///
/// ```text
/// config.json: FAILED (1 error, 0 warnings)
///   error at $.storage.filesystems.0.format: format cannot be empty when path, label, mount options or wipe are set [format_nil_with_others]
///
/// 1 document checked: 0 passed, 1 failed
/// ```
#[derive(Debug, Clone)]
pub struct PlainRenderer {
    show_warnings: bool,
}

impl PlainRenderer {
    pub fn new() -> Self {
        Self { show_warnings: true }
    }

    /// Hide warning entries (they still count in the header).
    pub fn show_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for PlainRenderer {
    fn render(&self, outcomes: &[Outcome]) -> KindleResult<String> {
        let mut out = String::new();

        for outcome in outcomes {
            match &outcome.result {
                Ok(report) => {
                    let status = if outcome.passed() { "ok" } else { "FAILED" };
                    writeln!(
                        out,
                        "{}: {} ({}, {})",
                        outcome.id,
                        status,
                        plural(report.error_count(), "error"),
                        plural(report.warning_count(), "warning"),
                    )
                    .context("writing report")?;

                    for entry in report.iter() {
                        if !entry.is_error() && !self.show_warnings {
                            continue;
                        }
                        writeln!(out, "  {} [{}]", entry, entry.kind.code())
                            .context("writing report")?;
                    }
                }
                Err(e) => {
                    writeln!(out, "{}: could not be validated: {}", outcome.id, e)
                        .context("writing report")?;
                }
            }
        }

        let passed = outcomes.iter().filter(|o| o.passed()).count();
        writeln!(
            out,
            "\n{} checked: {} passed, {} failed",
            plural(outcomes.len(), "document"),
            passed,
            outcomes.len() - passed
        )
        .context("writing report")?;

        Ok(out)
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
