//! Rule metadata and the interface rules implement

use crate::ast::ElementNode;
use crate::diagnostic::{Fix, Severity};
use std::fmt;

/// Rule category shown by `--list-rules` and `--explain`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Flags markup that is definitely wrong
    Correctness,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
        }
    }
}

/// Static description of a rule
#[derive(Debug, Clone)]
pub struct RuleMeta {
    /// Unique rule identifier (e.g., "img-has-alt")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// One-line description, used as diagnostic help
    pub description: &'static str,
    /// Default severity level
    pub severity: Severity,
    pub category: RuleCategory,
    /// Documentation URL
    pub docs: Option<&'static str>,
    /// Rationale explaining why this rule exists
    pub rationale: Option<&'static str>,
    /// Example of code that violates this rule
    pub example_bad: Option<&'static str>,
    /// Example of correct code
    pub example_good: Option<&'static str>,
}

impl RuleMeta {
    /// Multi-line explanation printed by `--explain`
    pub fn explain(&self) -> String {
        let mut out = format!("{} ({})\n\n{}\n", self.id, self.name, self.description);
        out.push_str(&format!(
            "\ncategory: {}\ndefault severity: {}\n",
            self.category, self.severity
        ));
        if let Some(rationale) = self.rationale {
            out.push_str(&format!("\nWhy:\n  {}\n", rationale));
        }
        if let Some(bad) = self.example_bad {
            out.push_str(&format!("\nIncorrect:\n  {}\n", bad));
        }
        if let Some(good) = self.example_good {
            out.push_str(&format!("\nCorrect:\n  {}\n", good));
        }
        if let Some(docs) = self.docs {
            out.push_str(&format!("\nSee: {}\n", docs));
        }
        out
    }
}

/// A problem a rule found on one element
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub message: String,
    pub fix: Option<Fix>,
}

impl Violation {
    pub fn new(message: String) -> Self {
        Self { message, fix: None }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// A check run once per element
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    /// Inspect one element; `None` means nothing to report
    fn check(&self, element: &ElementNode) -> Option<Violation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: RuleMeta = RuleMeta {
        id: "test-rule",
        name: "Test rule",
        description: "Checks things",
        severity: Severity::Warning,
        category: RuleCategory::Correctness,
        docs: Some("https://example.com/test-rule"),
        rationale: None,
        example_bad: Some("<bad />"),
        example_good: None,
    };

    #[test]
    fn test_explain() {
        let text = META.explain();
        assert!(text.starts_with("test-rule (Test rule)"));
        assert!(text.contains("category: correctness"));
        assert!(text.contains("default severity: warning"));
        assert!(text.contains("Incorrect:\n  <bad />"));
        assert!(!text.contains("Correct:\n"));
        assert!(text.contains("See: https://example.com/test-rule"));
    }

    #[test]
    fn test_violation_builder() {
        let v = Violation::new("msg".to_string()).with_fix(Fix::new("d", "r"));
        assert_eq!(v.message, "msg");
        assert!(v.fix.is_some());
    }
}
