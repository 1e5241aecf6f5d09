//! alt-lint - image alt-text checks for JSX element trees
//!
//! Flags image-rendering elements (`<img>` or configured components) that
//! lack a usable text alternative. The linter works on an element tree a host
//! parser has already produced and serialized as JSON; it never parses
//! source text itself.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> Rule (img-has-alt) -> ElementNode
//!                          |-> ElementMatcher
//!                          |-> props::get_prop
//!                          `-> truthiness::classify
//! ```
//!
//! # Example
//!
//! ```
//! use alt_lint::ast::{ElementNode, Expression};
//! use alt_lint::rules::{ImgHasAlt, Verdict};
//!
//! let rule = ImgHasAlt::default();
//! let img = ElementNode::new("img").with_attr("role", Expression::string("presentation"));
//! assert_eq!(rule.decide(&img), Some(Verdict::PreferNativeOverAria));
//! ```

pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod output;
pub mod props;
pub mod rule;
pub mod rules;
pub mod truthiness;

// Re-export main types
pub use ast::{AttributeEntry, Document, ElementNode, Expression, ParseError};
pub use config::{Config, ConfigError, ImgHasAltOptions};
pub use diagnostic::{Diagnostic, Fix, Location, Severity};
pub use engine::{Engine, LintResult};
pub use output::OutputFormatter;
pub use rule::{Rule, RuleCategory, RuleMeta, Violation};
pub use rules::{Decision, ElementMatcher, ImgHasAlt, Verdict};
pub use truthiness::Truthiness;
