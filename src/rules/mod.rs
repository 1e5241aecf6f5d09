//! Built-in rules

pub mod img_has_alt;

use crate::config::Config;
use crate::rule::{Rule, RuleMeta};

pub use img_has_alt::{Decision, ElementMatcher, ImgHasAlt, Verdict};

/// Metadata of every built-in rule
pub fn all_meta() -> Vec<&'static RuleMeta> {
    vec![&img_has_alt::META]
}

/// Look up a built-in rule by id
pub fn find_meta(id: &str) -> Option<&'static RuleMeta> {
    all_meta().into_iter().find(|m| m.id == id)
}

/// Instantiate the enabled built-in rules for a configuration
pub fn builtin_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    if config.is_rule_enabled(img_has_alt::RULE_ID) {
        rules.push(Box::new(ImgHasAlt::new(&config.rules.img_has_alt)));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_meta() {
        assert_eq!(find_meta("img-has-alt").map(|m| m.id), Some("img-has-alt"));
        assert!(find_meta("no-such-rule").is_none());
    }

    #[test]
    fn test_builtin_rules_respect_disabled() {
        let mut config = Config::new();
        assert_eq!(builtin_rules(&config).len(), 1);

        config.rules.disabled.push("img-has-alt".to_string());
        assert!(builtin_rules(&config).is_empty());
    }
}
