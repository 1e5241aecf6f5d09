//! `img-has-alt`: image-rendering elements need a text alternative
//!
//! Flags `<img>` (or configured image components) that
//! - have no `alt` attribute,
//! - have an `alt` whose value is statically missing or falsy, or
//! - hide themselves with `role="presentation"` instead of `alt=""`.

use crate::ast::ElementNode;
use crate::config::ImgHasAltOptions;
use crate::diagnostic::{Fix, Severity};
use crate::props::{get_prop, literal_prop_value};
use crate::rule::{Rule, RuleCategory, RuleMeta, Violation};
use crate::truthiness::classify;
use std::fmt;

pub const RULE_ID: &str = "img-has-alt";

const DEFAULT_ELEMENT: &str = "img";

pub static META: RuleMeta = RuleMeta {
    id: RULE_ID,
    name: "Image has alt",
    description: "Enforce that image-rendering elements have an alt prop, or alt=\"\" when decorative",
    severity: Severity::Error,
    category: RuleCategory::Correctness,
    docs: Some("https://www.w3.org/WAI/tutorials/images/decision-tree/"),
    rationale: Some(
        "Screen readers announce the alt text in place of the image. Without it they fall back \
         to the file name or skip the image silently.",
    ),
    example_bad: Some("<img src=\"logo.png\" />"),
    example_good: Some("<img src=\"logo.png\" alt=\"Company logo\" />"),
};

/// Outcome for an element that needs reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No `alt` attribute at all
    MissingAlternative(String),
    /// `alt` present but statically missing or falsy
    InvalidAlternativeValue(String),
    /// No `alt`, hidden with `role="presentation"`
    PreferNativeOverAria,
}

impl Verdict {
    pub fn message(&self) -> String {
        match self {
            Verdict::MissingAlternative(tag) => format!(
                "{} elements must have an alt prop, either with meaningful text, or an empty string for decorative images.",
                tag
            ),
            Verdict::InvalidAlternativeValue(tag) => format!(
                "Invalid alt value for {}. Use alt=\"\" for presentational images.",
                tag
            ),
            Verdict::PreferNativeOverAria => "Prefer alt=\"\" over role=\"presentation\". First rule of aria is to not use aria if it can be achieved via native HTML.".to_string(),
        }
    }

    fn fix(&self) -> Option<Fix> {
        match self {
            Verdict::MissingAlternative(_) => Some(Fix::new(
                "Describe the image, or add alt=\"\" if it is decorative",
                "alt=\"\"",
            )),
            Verdict::PreferNativeOverAria => Some(Fix::new(
                "Replace role=\"presentation\" with alt=\"\"",
                "alt=\"\"",
            )),
            Verdict::InvalidAlternativeValue(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Full outcome for one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Not an image-rendering element
    Skip,
    /// Image-rendering element with an acceptable alternative
    Ok,
    Report(Verdict),
}

impl Decision {
    pub fn into_verdict(self) -> Option<Verdict> {
        match self {
            Decision::Report(verdict) => Some(verdict),
            Decision::Skip | Decision::Ok => None,
        }
    }
}

/// Decides which tag names render an image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMatcher {
    components: Vec<String>,
}

impl ElementMatcher {
    pub fn new(components: &[String]) -> Self {
        Self {
            components: components.to_vec(),
        }
    }

    /// `img` in any casing by default; exact names once components are configured
    pub fn matches(&self, tag_name: &str) -> bool {
        if self.components.is_empty() {
            return tag_name.eq_ignore_ascii_case(DEFAULT_ELEMENT);
        }
        self.components.iter().any(|c| c == tag_name)
    }
}

/// The `img-has-alt` rule
#[derive(Debug, Clone, Default)]
pub struct ImgHasAlt {
    matcher: ElementMatcher,
}

impl ImgHasAlt {
    pub fn new(options: &ImgHasAltOptions) -> Self {
        Self {
            matcher: ElementMatcher::new(&options.components),
        }
    }

    pub fn matcher(&self) -> &ElementMatcher {
        &self.matcher
    }

    /// Classify one element
    pub fn evaluate(&self, element: &ElementNode) -> Decision {
        let tag = element.name.as_str();
        if !self.matcher.matches(tag) {
            return Decision::Skip;
        }

        let Some(alt) = get_prop(&element.attributes, "alt") else {
            let presentational = get_prop(&element.attributes, "role")
                .and_then(literal_prop_value)
                .is_some_and(|role| role == "presentation");

            return if presentational {
                Decision::Report(Verdict::PreferNativeOverAria)
            } else {
                Decision::Report(Verdict::MissingAlternative(tag.to_string()))
            };
        };

        let truthiness = classify(alt.value.as_ref());
        log::trace!("{}: alt on <{}> classified {}", RULE_ID, tag, truthiness);

        if truthiness.is_invalid() {
            Decision::Report(Verdict::InvalidAlternativeValue(tag.to_string()))
        } else {
            Decision::Ok
        }
    }

    /// Verdict for one element, `None` when skipped or fine
    pub fn decide(&self, element: &ElementNode) -> Option<Verdict> {
        self.evaluate(element).into_verdict()
    }
}

impl Rule for ImgHasAlt {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn check(&self, element: &ElementNode) -> Option<Violation> {
        let verdict = self.decide(element)?;
        let violation = Violation::new(verdict.message());
        Some(match verdict.fix() {
            Some(fix) => violation.with_fix(fix),
            None => violation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    fn default_rule() -> ImgHasAlt {
        ImgHasAlt::default()
    }

    fn component_rule() -> ImgHasAlt {
        ImgHasAlt::new(&ImgHasAltOptions {
            components: vec!["Thumbnail".to_string(), "Image".to_string()],
        })
    }

    fn missing(tag: &str) -> Option<Verdict> {
        Some(Verdict::MissingAlternative(tag.to_string()))
    }

    fn invalid(tag: &str) -> Option<Verdict> {
        Some(Verdict::InvalidAlternativeValue(tag.to_string()))
    }

    #[test]
    fn test_matcher_default() {
        let matcher = ElementMatcher::default();
        assert!(matcher.matches("img"));
        assert!(matcher.matches("IMG"));
        assert!(matcher.matches("Img"));
        assert!(!matcher.matches("a"));
        assert!(!matcher.matches("Image"));
        assert!(!matcher.matches("UX.Layout"));
    }

    #[test]
    fn test_matcher_components() {
        let matcher = component_rule().matcher().clone();
        assert!(matcher.matches("Thumbnail"));
        assert!(matcher.matches("Image"));
        assert!(!matcher.matches("thumbnail"));
        assert!(!matcher.matches("IMAGE"));
        assert!(!matcher.matches("img"));
    }

    #[test]
    fn test_no_attributes() {
        let el = ElementNode::new("img");
        assert_eq!(default_rule().decide(&el), missing("img"));
    }

    #[test]
    fn test_bare_alt() {
        let el = ElementNode::new("img").with_flag("alt");
        assert_eq!(default_rule().decide(&el), invalid("img"));
    }

    #[test]
    fn test_role_presentation_only() {
        let el = ElementNode::new("img").with_attr("role", Expression::string("presentation"));
        assert_eq!(
            default_rule().decide(&el),
            Some(Verdict::PreferNativeOverAria)
        );

        let el = ElementNode::new("img").with_attr("role", Expression::template("presentation"));
        assert_eq!(
            default_rule().decide(&el),
            Some(Verdict::PreferNativeOverAria)
        );
    }

    #[test]
    fn test_other_role_values() {
        let rule = default_rule();
        for role in [
            Expression::string("img"),
            Expression::string("Presentation"),
            Expression::ident("role"),
        ] {
            let el = ElementNode::new("img").with_attr("role", role);
            assert_eq!(rule.decide(&el), missing("img"));
        }

        let el = ElementNode::new("img").with_flag("role");
        assert_eq!(rule.decide(&el), missing("img"));
    }

    #[test]
    fn test_alt_short_circuits_role() {
        let rule = default_rule();

        let el = ElementNode::new("img")
            .with_attr("alt", Expression::string(""))
            .with_attr("role", Expression::string("presentation"));
        assert_eq!(rule.evaluate(&el), Decision::Ok);

        let el = ElementNode::new("img")
            .with_attr("alt", Expression::Undefined)
            .with_attr("role", Expression::string("presentation"));
        assert_eq!(rule.decide(&el), invalid("img"));

        let el = ElementNode::new("img")
            .with_flag("alt")
            .with_attr("role", Expression::string("presentation"));
        assert_eq!(rule.decide(&el), invalid("img"));
    }

    #[test]
    fn test_spread_does_not_satisfy_alt() {
        let props = Expression::member(Expression::ident("this"), "props");
        let rule = default_rule();

        let el = ElementNode::new("img").with_spread(props.clone());
        assert_eq!(rule.decide(&el), missing("img"));

        let el = ElementNode::new("img")
            .with_spread(props)
            .with_attr("alt", Expression::string("foo"));
        assert_eq!(rule.evaluate(&el), Decision::Ok);
    }

    #[test]
    fn test_unmatched_elements_skip() {
        let rule = default_rule();
        let el = ElementNode::new("div").with_attr("alt", Expression::FunctionExpression);
        assert_eq!(rule.evaluate(&el), Decision::Skip);
        assert_eq!(rule.evaluate(&ElementNode::new("a")), Decision::Skip);
        assert_eq!(rule.evaluate(&ElementNode::new("UX.Layout")), Decision::Skip);
    }

    #[test]
    fn test_components_configuration() {
        let rule = component_rule();

        let el = ElementNode::new("Thumbnail").with_attr("src", Expression::string("xyz"));
        assert_eq!(rule.decide(&el), missing("Thumbnail"));

        let el = ElementNode::new("Image").with_attr(
            "alt",
            Expression::member(Expression::ident("photo"), "caption"),
        );
        assert_eq!(rule.evaluate(&el), Decision::Ok);

        assert_eq!(rule.decide(&ElementNode::new("Image").with_flag("alt")), invalid("Image"));
        assert_eq!(rule.evaluate(&ElementNode::new("thumbnail")), Decision::Skip);
        assert_eq!(rule.evaluate(&ElementNode::new("IMAGE")), Decision::Skip);
        assert_eq!(rule.evaluate(&ElementNode::new("img")), Decision::Skip);
    }

    #[test]
    fn test_idempotent() {
        let rule = default_rule();
        let el = ElementNode::new("img").with_attr(
            "alt",
            Expression::or(Expression::boolean(false), Expression::boolean(false)),
        );
        let first = rule.decide(&el);
        assert_eq!(first, invalid("img"));
        assert_eq!(rule.decide(&el), first);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Verdict::MissingAlternative("img".into()).message(),
            "img elements must have an alt prop, either with meaningful text, or an empty string for decorative images."
        );
        assert_eq!(
            Verdict::InvalidAlternativeValue("Thumbnail".into()).to_string(),
            "Invalid alt value for Thumbnail. Use alt=\"\" for presentational images."
        );
        assert_eq!(
            Verdict::PreferNativeOverAria.message(),
            "Prefer alt=\"\" over role=\"presentation\". First rule of aria is to not use aria if it can be achieved via native HTML."
        );
    }

    #[test]
    fn test_check_builds_violation() {
        let rule = default_rule();
        assert_eq!(rule.meta().id, "img-has-alt");

        let violation = rule
            .check(&ElementNode::new("img").with_attr("role", Expression::string("presentation")))
            .unwrap();
        assert!(violation.message.starts_with("Prefer alt=\"\""));
        assert_eq!(violation.fix.unwrap().replacement, "alt=\"\"");

        let violation = rule
            .check(&ElementNode::new("img").with_attr("alt", Expression::Undefined))
            .unwrap();
        assert!(violation.fix.is_none());

        assert!(rule
            .check(&ElementNode::new("img").with_attr("alt", Expression::string("foo")))
            .is_none());
    }
}
