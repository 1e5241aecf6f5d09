//! Findings reported against a linted file

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// How serious a finding is, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a finding points; line and column are 1-based, 0 for the whole file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    /// Width of the underline under the source line
    pub length: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            length: 0,
        }
    }

    /// The span of an element inside `file`
    pub fn of_span(file: &Path, span: Span) -> Self {
        Self {
            file: file.to_path_buf(),
            line: span.line,
            column: span.column,
            length: span.length,
        }
    }

    /// A file that could not be loaded at all
    pub fn whole_file(file: &Path) -> Self {
        Self::new(file.to_path_buf(), 0, 0)
    }
}

/// Replacement text shown next to a finding. Never applied to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub description: String,
    pub replacement: String,
}

impl Fix {
    pub fn new(description: &str, replacement: &str) -> Self {
        Self {
            description: description.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// One finding: a rule, a place, and what to do about it
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// Text of `location.line`, when the document carried its source
    pub source_line: Option<String>,
    pub help: Option<String>,
    pub fix: Option<Fix>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(rule_id: &str, severity: Severity, message: &str, location: Location) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            location,
            source_line: None,
            help: None,
            fix: None,
            notes: Vec::new(),
        }
    }

    pub fn with_source_line(mut self, line: &str) -> Self {
        self.source_line = Some(line.to_string());
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order_and_names() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Warning.to_string(), "warning");

        let parsed: Severity = serde_yaml::from_str("error").unwrap();
        assert_eq!(parsed, Severity::Error);
        assert!(serde_yaml::from_str::<Severity>("warn").is_err());
    }

    #[test]
    fn test_location_of_span() {
        let span = Span {
            line: 3,
            column: 7,
            length: 12,
        };
        let loc = Location::of_span(Path::new("Card.json"), span);
        assert_eq!(loc, Location {
            file: PathBuf::from("Card.json"),
            line: 3,
            column: 7,
            length: 12,
        });

        let whole = Location::whole_file(Path::new("Card.json"));
        assert_eq!((whole.line, whole.column), (0, 0));
    }

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::new(
            "img-has-alt",
            Severity::Warning,
            "Test",
            Location::new(PathBuf::from("Card.json"), 3, 7),
        )
        .with_source_line("  <img />")
        .with_help("Images need a text alternative")
        .with_fix(Fix::new("Add an empty alt", "alt=\"\""))
        .with_note("JSXOpeningElement");

        assert_eq!(diag.source_line.as_deref(), Some("  <img />"));
        assert_eq!(diag.help.as_deref(), Some("Images need a text alternative"));
        assert_eq!(diag.fix, Some(Fix::new("Add an empty alt", "alt=\"\"")));
        assert_eq!(diag.notes, vec!["JSXOpeningElement".to_string()]);
    }
}
