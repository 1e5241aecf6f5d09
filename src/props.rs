//! Attribute lookup on element attribute lists
//!
//! Spread entries (`{...props}`) are never considered to provide an
//! attribute: their contents are unknown, and a check that requires an
//! explicit attribute must not be satisfied by them.

use crate::ast::{AttributeEntry, ElementNode, NamedAttribute};

/// Find the first named attribute called `name` (case-insensitive)
pub fn get_prop<'a>(attributes: &'a [AttributeEntry], name: &str) -> Option<&'a NamedAttribute> {
    attributes.iter().find_map(|entry| match entry {
        AttributeEntry::Attribute(attr) if attr.name.eq_ignore_ascii_case(name) => Some(attr),
        _ => None,
    })
}

/// Check whether a named attribute called `name` is declared
pub fn has_prop(attributes: &[AttributeEntry], name: &str) -> bool {
    get_prop(attributes, name).is_some()
}

/// Static string value of an attribute, if it is written as a literal
///
/// Only string literals and template literals without substitutions have
/// one; everything else, including a bare attribute, yields `None`.
pub fn literal_prop_value(attr: &NamedAttribute) -> Option<String> {
    attr.value.as_ref()?.static_text()
}

impl ElementNode {
    /// Shorthand for [`get_prop`] on this element's attributes
    pub fn prop(&self, name: &str) -> Option<&NamedAttribute> {
        get_prop(&self.attributes, name)
    }
}
