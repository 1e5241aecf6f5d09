//! Compact output formatter
//!
//! One line per diagnostic, minimal output for scripting.

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;

/// `file:line:col: severity [rule] message`
#[derive(Debug, Default, Clone, Copy)]
pub struct CompactFormatter;

impl CompactFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }

        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "{}:{}:{}: {} [{}] {}",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.severity,
            diagnostic.rule_id,
            diagnostic.message
        )
    }
}
