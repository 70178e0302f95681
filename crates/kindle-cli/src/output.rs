//! Output management and formatting.

use std::fmt::Write as _;
use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use kindle_adapters::{JsonRenderer, PlainRenderer};
use kindle_core::{
    application::{Outcome, ReportRenderer},
    domain::Severity,
    error::{Context, KindleResult},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    show_warnings: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// The flag wins over `output.format`; `auto` in both resolves to Human
    /// on a TTY and Plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => config.output_format(),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            show_warnings: config.output.show_warnings,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Render validation outcomes in the resolved format.
    ///
    /// JSON is always written, even in quiet mode; quiet text output keeps
    /// only failing documents.
    pub fn report(&self, outcomes: &[Outcome], hide_warnings: bool) -> KindleResult<()> {
        let show_warnings = self.show_warnings && !hide_warnings;

        let text = match self.resolved_format {
            OutputFormat::Json => JsonRenderer::new().show_warnings(show_warnings).render(outcomes)?,
            _ if self.quiet => {
                let failing: Vec<Outcome> =
                    outcomes.iter().filter(|o| !o.passed()).cloned().collect();
                if failing.is_empty() {
                    return Ok(());
                }
                PlainRenderer::new().show_warnings(false).render(&failing)?
            }
            OutputFormat::Human if !self.no_color => {
                HumanRenderer { show_warnings }.render(outcomes)?
            }
            _ => PlainRenderer::new().show_warnings(show_warnings).render(outcomes)?,
        };

        self.term
            .write_str(&text)
            .context("writing report to stdout")?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Colored, indented report for terminals.
struct HumanRenderer {
    show_warnings: bool,
}

impl ReportRenderer for HumanRenderer {
    fn render(&self, outcomes: &[Outcome]) -> KindleResult<String> {
        let mut out = String::new();

        for outcome in outcomes {
            let id = outcome.id.to_string();
            match &outcome.result {
                Ok(report) if report.is_empty() => {
                    writeln!(out, "{} {}", "\u{2713}".green().bold(), id.bold())
                        .context("writing report")?;
                }
                Ok(report) => {
                    let mark = if outcome.passed() {
                        "\u{26a0}".yellow().bold().to_string()
                    } else {
                        "\u{2717}".red().bold().to_string()
                    };
                    writeln!(
                        out,
                        "{} {} {}",
                        mark,
                        id.bold(),
                        format!(
                            "({} errors, {} warnings)",
                            report.error_count(),
                            report.warning_count()
                        )
                        .dimmed()
                    )
                    .context("writing report")?;

                    for entry in report.iter() {
                        let label = match entry.severity {
                            Severity::Error => "error".red().bold().to_string(),
                            Severity::Warning if self.show_warnings => {
                                "warning".yellow().bold().to_string()
                            }
                            Severity::Warning => continue,
                        };
                        writeln!(
                            out,
                            "    {} {} {} {}",
                            label,
                            entry.path.to_string().cyan(),
                            entry.message,
                            format!("[{}]", entry.kind.code()).dimmed()
                        )
                        .context("writing report")?;
                        if let Some(hint) = entry.kind.hint() {
                            writeln!(out, "      {} {}", "hint:".blue(), hint)
                                .context("writing report")?;
                        }
                    }
                }
                Err(e) => {
                    writeln!(out, "{} {}", "\u{2717}".red().bold(), id.bold())
                        .context("writing report")?;
                    writeln!(out, "    {}", e.to_string().red()).context("writing report")?;
                }
            }
        }

        let passed = outcomes.iter().filter(|o| o.passed()).count();
        let failed = outcomes.len() - passed;
        let summary = format!(
            "{} checked, {} passed, {} failed",
            outcomes.len(),
            passed,
            failed
        );
        let summary = if failed == 0 {
            summary.green().bold().to_string()
        } else {
            summary.red().bold().to_string()
        };
        writeln!(out, "\n{summary}").context("writing report")?;

        Ok(out)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
