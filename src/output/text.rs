//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;
use std::collections::BTreeMap;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show source line with underline
    pub show_source: bool,

    /// Show help text
    pub show_help: bool,

    /// Show fix suggestions
    pub show_fixes: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_help: true,
            show_fixes: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Hide the summary line
    pub fn without_stats(mut self) -> Self {
        self.show_stats = false;
        self
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.colored {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_str(&self, severity: Severity) -> String {
        let s = severity.to_string();
        match severity {
            Severity::Error => self.paint(&s, |t| t.red().bold()),
            Severity::Warning => self.paint(&s, |t| t.yellow().bold()),
            Severity::Info => self.paint(&s, |t| t.blue()),
        }
    }

    fn count(&self, n: usize, singular: &str, plural: &str, style: fn(&str) -> ColoredString) -> String {
        let s = format!("{} {}", n, if n == 1 { singular } else { plural });
        self.paint(&s, style)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for diag in &result.diagnostics {
            by_file.entry(&diag.location.file).or_default().push(diag);
        }

        for (file, diagnostics) in &by_file {
            output.push_str(&self.paint(&file.display().to_string(), |t| t.underline()));
            output.push('\n');

            for diag in diagnostics {
                output.push_str(&self.format_diagnostic(diag));
                output.push('\n');
            }
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                counts.push(self.count(result.error_count, "error", "errors", |t| t.red()));
            }
            if result.warning_count > 0 {
                counts.push(self.count(result.warning_count, "warning", "warnings", |t| {
                    t.yellow()
                }));
            }
            if result.info_count > 0 {
                counts.push(self.count(result.info_count, "info", "infos", |t| t.blue()));
            }

            if counts.is_empty() {
                output.push_str(&format!(": {}", self.paint("no problems", |t| t.green())));
            } else {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let mut output = String::new();
        let bar = self.paint("|", |t| t.blue());

        output.push_str(&format!(
            "{}:{}:{}: {}[{}]: {}\n",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column,
            self.severity_str(diag.severity),
            self.paint(&diag.rule_id, |t| t.cyan()),
            diag.message
        ));

        if self.show_source {
            if let Some(source) = &diag.source_line {
                let line_num = format!("{:>4}", diag.location.line);
                output.push_str(&format!(
                    "{} {} {}\n",
                    self.paint(&line_num, |t| t.blue()),
                    bar,
                    source
                ));

                if diag.location.column > 0 {
                    let padding = " ".repeat(diag.location.column - 1);
                    let underline = "^".repeat(diag.location.length.max(1));
                    output.push_str(&format!(
                        "     {} {}{}\n",
                        bar,
                        padding,
                        self.paint(&underline, |t| t.red())
                    ));
                }
            }
        }

        if self.show_help {
            if let Some(help) = &diag.help {
                output.push_str(&format!("   {} help: {}\n", self.paint("=", |t| t.blue()), help));
            }
        }

        if self.show_fixes {
            if let Some(fix) = &diag.fix {
                output.push_str(&format!(
                    "   {} fix: {} -> {}\n",
                    self.paint("=", |t| t.green()),
                    fix.description,
                    self.paint(&fix.replacement, |t| t.green())
                ));
            }
        }

        for note in &diag.notes {
            output.push_str(&format!("   {} note: {}\n", self.paint("=", |t| t.blue()), note));
        }

        output
    }
}
