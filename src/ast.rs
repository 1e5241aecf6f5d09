//! Element tree handed over by the host parser
//!
//! The linter does not parse source text. A host front-end serializes the
//! JSX element tree of a file as JSON and this module deserializes it into
//! [`Document`], [`ElementNode`] and [`Expression`] values.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Error while loading a serialized document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON parse error at line {line}: {message}")]
    Json { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json {
            line: err.line(),
            message: err.to_string(),
        }
    }
}

/// Position of a node in the linted source (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    #[serde(default)]
    pub length: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            length: 0,
        }
    }
}

/// Operator of a short-circuit logical expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
}

/// An attribute-value expression
///
/// Node kinds follow the Babel/ESTree names. Kinds that are not modelled
/// here, and nodes whose shape does not fit the modelled kind, load as
/// [`Expression::Other`] instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", remote = "Self")]
pub enum Expression {
    StringLiteral {
        value: String,
    },
    TemplateLiteral {
        #[serde(default, deserialize_with = "quasi_texts")]
        quasis: Vec<String>,
        #[serde(default)]
        expressions: Vec<Expression>,
    },
    BooleanLiteral {
        value: bool,
    },
    NumericLiteral {
        value: f64,
    },
    NullLiteral,
    /// The `undefined` identifier
    Undefined,
    Identifier {
        name: String,
    },
    MemberExpression {
        object: Box<Expression>,
        property: Box<Expression>,
    },
    CallExpression {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    FunctionExpression,
    ArrowFunctionExpression,
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    ConditionalExpression {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    BinaryExpression {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<Expression>,
    },
    /// Any syntax kind the host emitted that is not modelled above
    Other {
        kind: String,
    },
}

/// `type` tags that map onto a modelled variant
const MODELLED_KINDS: &[&str] = &[
    "StringLiteral",
    "TemplateLiteral",
    "BooleanLiteral",
    "NumericLiteral",
    "NullLiteral",
    "Undefined",
    "Identifier",
    "MemberExpression",
    "CallExpression",
    "FunctionExpression",
    "ArrowFunctionExpression",
    "LogicalExpression",
    "ConditionalExpression",
    "BinaryExpression",
    "UnaryExpression",
    "Other",
];

/// Wrapper the host may leave around `name={expression}` values
const EXPRESSION_CONTAINER: &str = "JSXExpressionContainer";

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = Value::deserialize(deserializer)?;
        let kind = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| <D::Error as de::Error>::missing_field("type"))?
            .to_string();

        if kind == EXPRESSION_CONTAINER {
            let inner = node
                .get("expression")
                .cloned()
                .ok_or_else(|| <D::Error as de::Error>::missing_field("expression"))?;
            return serde_json::from_value(inner).map_err(<D::Error as de::Error>::custom);
        }

        if !MODELLED_KINDS.contains(&kind.as_str()) {
            return Ok(Expression::Other { kind });
        }

        match Expression::deserialize(node) {
            Ok(Expression::Identifier { name }) => Ok(Expression::ident(&name)),
            Ok(expr) => Ok(expr),
            Err(e) => {
                log::debug!("Unsupported {} node: {}", kind, e);
                Ok(Expression::Other { kind })
            }
        }
    }
}

/// Template parts, either plain strings or `TemplateElement` nodes
fn quasi_texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct QuasiValue {
        raw: String,
        #[serde(default)]
        cooked: Option<String>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quasi {
        Text(String),
        Element { value: QuasiValue },
    }

    let quasis = Vec::<Quasi>::deserialize(deserializer)?;
    Ok(quasis
        .into_iter()
        .map(|quasi| match quasi {
            Quasi::Text(text) => text,
            Quasi::Element { value } => value.cooked.unwrap_or(value.raw),
        })
        .collect())
}

impl Expression {
    pub fn string(value: &str) -> Self {
        Expression::StringLiteral {
            value: value.to_string(),
        }
    }

    /// Template literal without substitutions
    pub fn template(text: &str) -> Self {
        Expression::TemplateLiteral {
            quasis: vec![text.to_string()],
            expressions: Vec::new(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Expression::BooleanLiteral { value }
    }

    pub fn ident(name: &str) -> Self {
        if name == "undefined" {
            return Expression::Undefined;
        }
        Expression::Identifier {
            name: name.to_string(),
        }
    }

    pub fn member(object: Expression, property: &str) -> Self {
        Expression::MemberExpression {
            object: Box::new(object),
            property: Box::new(Expression::ident(property)),
        }
    }

    pub fn call(callee: Expression) -> Self {
        Expression::CallExpression {
            callee: Box::new(callee),
            arguments: Vec::new(),
        }
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::LogicalExpression {
            operator: LogicalOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::LogicalExpression {
            operator: LogicalOperator::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn conditional(test: Expression, consequent: Expression, alternate: Expression) -> Self {
        Expression::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    pub fn binary(operator: &str, left: Expression, right: Expression) -> Self {
        Expression::BinaryExpression {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Static text of a string literal or a template literal without substitutions
    pub fn static_text(&self) -> Option<String> {
        match self {
            Expression::StringLiteral { value } => Some(value.clone()),
            Expression::TemplateLiteral {
                quasis,
                expressions,
            } if expressions.is_empty() => Some(quasis.concat()),
            _ => None,
        }
    }
}

/// `name={value}` or a bare boolean `name`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedAttribute {
    pub name: String,
    /// `None` when the attribute has no assigned value
    #[serde(default)]
    pub value: Option<Expression>,
    #[serde(default)]
    pub span: Span,
}

/// `{...argument}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpreadAttribute {
    pub argument: Expression,
    #[serde(default)]
    pub span: Span,
}

/// One entry of an element's attribute list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeEntry {
    Attribute(NamedAttribute),
    Spread(SpreadAttribute),
}

/// A JSX opening element together with its nested elements
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementNode {
    /// Tag name, dotted for member names (`UX.Layout`)
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            span: Span::default(),
            children: Vec::new(),
        }
    }

    pub fn with_span(mut self, line: usize, column: usize) -> Self {
        self.span = Span::new(line, column);
        self
    }

    /// Add `name={value}`
    pub fn with_attr(mut self, name: &str, value: Expression) -> Self {
        self.attributes.push(AttributeEntry::Attribute(NamedAttribute {
            name: name.to_string(),
            value: Some(value),
            span: self.span,
        }));
        self
    }

    /// Add a bare `name` attribute with no value
    pub fn with_flag(mut self, name: &str) -> Self {
        self.attributes.push(AttributeEntry::Attribute(NamedAttribute {
            name: name.to_string(),
            value: None,
            span: self.span,
        }));
        self
    }

    /// Add `{...argument}`
    pub fn with_spread(mut self, argument: Expression) -> Self {
        self.attributes.push(AttributeEntry::Spread(SpreadAttribute {
            argument,
            span: self.span,
        }));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A serialized file: its element forest plus optional source text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementNode>,
}

impl Document {
    pub fn new(elements: Vec<ElementNode>) -> Self {
        Self {
            source: None,
            elements,
        }
    }

    /// Read and deserialize a document file
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Deserialize a document from JSON
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let document: Document = serde_json::from_str(content)?;
        if let Some(bad) = document.iter().find(|e| e.name.is_empty()) {
            return Err(ParseError::Invalid(format!(
                "element at line {} has an empty name",
                bad.span.line
            )));
        }
        Ok(document)
    }

    /// Iterate over all elements in source order (depth-first, pre-order)
    pub fn iter(&self) -> impl Iterator<Item = &ElementNode> + '_ {
        let mut stack: Vec<&ElementNode> = self.elements.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Get source line at line number (1-based)
    pub fn get_source_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.source.as_deref()?.lines().nth(line - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "source": "<img alt=\"\" />",
            "elements": [{
                "name": "img",
                "span": {"line": 1, "column": 1},
                "attributes": [
                    {"type": "attribute", "name": "alt", "value": {"type": "StringLiteral", "value": ""}},
                    {"type": "spread", "argument": {"type": "MemberExpression",
                        "object": {"type": "Identifier", "name": "this"},
                        "property": {"type": "Identifier", "name": "props"}}},
                    {"type": "attribute", "name": "hidden"}
                ]
            }]
        }"#;

        let doc = Document::parse(json).unwrap();
        assert_eq!(doc.elements.len(), 1);

        let img = &doc.elements[0];
        assert_eq!(img.name, "img");
        assert_eq!(img.span, Span::new(1, 1));
        assert_eq!(img.attributes.len(), 3);
        match &img.attributes[1] {
            AttributeEntry::Spread(spread) => assert_eq!(
                spread.argument,
                Expression::member(Expression::ident("this"), "props")
            ),
            other => panic!("unexpected entry: {:?}", other),
        }
        match &img.attributes[2] {
            AttributeEntry::Attribute(attr) => assert!(attr.value.is_none()),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(doc.get_source_line(1), Some("<img alt=\"\" />"));
        assert_eq!(doc.get_source_line(2), None);
    }

    #[test]
    fn test_parse_logical_operators() {
        let json = r#"{"elements": [{"name": "img", "attributes": [
            {"type": "attribute", "name": "alt", "value": {
                "type": "LogicalExpression", "operator": "||",
                "left": {"type": "Identifier", "name": "alt"},
                "right": {"type": "StringLiteral", "value": "Alt text"}}}
        ]}]}"#;

        let doc = Document::parse(json).unwrap();
        let expected = ElementNode::new("img").with_attr(
            "alt",
            Expression::or(Expression::ident("alt"), Expression::string("Alt text")),
        );
        assert_eq!(doc.elements[0], expected);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Document::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));

        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"elements": [{"name": "img"}]}"#).unwrap();
        assert_eq!(Document::load(&path).unwrap().elements[0].name, "img");
    }

    #[test]
    fn test_parse_errors() {
        let err = Document::parse("{ not json").unwrap_err();
        assert!(matches!(err, ParseError::Json { line: 1, .. }));

        let err = Document::parse(r#"{"elements": [{"name": ""}]}"#).unwrap_err();
        assert!(matches!(err, ParseError::Invalid(_)));
    }

    #[test]
    fn test_iter_source_order() {
        let doc = Document::new(vec![
            ElementNode::new("div")
                .with_child(ElementNode::new("img"))
                .with_child(ElementNode::new("span").with_child(ElementNode::new("Image"))),
            ElementNode::new("a"),
        ]);

        let names: Vec<&str> = doc.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["div", "img", "span", "Image", "a"]);
    }

    #[test]
    fn test_static_text() {
        assert_eq!(Expression::string("x").static_text(), Some("x".to_string()));
        assert_eq!(
            Expression::template("presentation").static_text(),
            Some("presentation".to_string())
        );
        let with_expr = Expression::TemplateLiteral {
            quasis: vec!["a".into(), "b".into()],
            expressions: vec![Expression::ident("x")],
        };
        assert_eq!(with_expr.static_text(), None);
        assert_eq!(Expression::ident("role").static_text(), None);
    }

    fn alt_value(json: &str) -> Option<Expression> {
        let doc = Document::parse(&format!(
            r#"{{"elements": [{{"name": "img", "attributes": [
                {{"type": "attribute", "name": "alt", "value": {}}}]}}]}}"#,
            json
        ))
        .unwrap();
        match &doc.elements[0].attributes[0] {
            AttributeEntry::Attribute(attr) => attr.value.clone(),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unmodelled_kinds() {
        for kind in [
            "ThisExpression",
            "ObjectExpression",
            "JSXElement",
            "TaggedTemplateExpression",
        ] {
            let value = alt_value(&format!(r#"{{"type": "{}", "start": 4}}"#, kind));
            assert_eq!(
                value,
                Some(Expression::Other {
                    kind: kind.to_string()
                })
            );
        }

        let value = alt_value(
            r#"{"type": "MemberExpression", "computed": false,
                "object": {"type": "ThisExpression"},
                "property": {"type": "Identifier", "name": "alt"}}"#,
        );
        assert_eq!(
            value,
            Some(Expression::MemberExpression {
                object: Box::new(Expression::Other {
                    kind: "ThisExpression".to_string()
                }),
                property: Box::new(Expression::ident("alt")),
            })
        );
    }

    #[test]
    fn test_parse_computed_member() {
        let value = alt_value(
            r#"{"type": "MemberExpression", "computed": true,
                "object": {"type": "Identifier", "name": "captions"},
                "property": {"type": "NumericLiteral", "value": 0}}"#,
        );
        assert_eq!(
            value,
            Some(Expression::MemberExpression {
                object: Box::new(Expression::ident("captions")),
                property: Box::new(Expression::NumericLiteral { value: 0.0 }),
            })
        );
    }

    #[test]
    fn test_parse_unsupported_shape_as_other() {
        let value = alt_value(
            r#"{"type": "LogicalExpression", "operator": "??",
                "left": {"type": "Identifier", "name": "alt"},
                "right": {"type": "StringLiteral", "value": ""}}"#,
        );
        assert_eq!(
            value,
            Some(Expression::Other {
                kind: "LogicalExpression".to_string()
            })
        );

        let err = Document::parse(
            r#"{"elements": [{"name": "img", "attributes": [
                {"type": "attribute", "name": "alt", "value": {"value": "x"}}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Json { .. }));
    }

    #[test]
    fn test_parse_undefined_identifier() {
        let value = alt_value(r#"{"type": "Identifier", "name": "undefined"}"#);
        assert_eq!(value, Some(Expression::Undefined));

        let value = alt_value(
            r#"{"type": "LogicalExpression", "operator": "&&",
                "left": {"type": "Identifier", "name": "ready"},
                "right": {"type": "Identifier", "name": "undefined"}}"#,
        );
        assert_eq!(
            value,
            Some(Expression::and(Expression::ident("ready"), Expression::Undefined))
        );
    }

    #[test]
    fn test_parse_expression_container() {
        let value = alt_value(
            r#"{"type": "JSXExpressionContainer",
                "expression": {"type": "BooleanLiteral", "value": false}}"#,
        );
        assert_eq!(value, Some(Expression::boolean(false)));
    }

    #[test]
    fn test_parse_template_elements() {
        let value = alt_value(
            r#"{"type": "TemplateLiteral",
                "quasis": [
                    {"type": "TemplateElement", "value": {"raw": "Photo of ", "cooked": "Photo of "}},
                    {"type": "TemplateElement", "value": {"raw": ""}}
                ],
                "expressions": [{"type": "Identifier", "name": "name"}]}"#,
        );
        assert_eq!(
            value,
            Some(Expression::TemplateLiteral {
                quasis: vec!["Photo of ".to_string(), String::new()],
                expressions: vec![Expression::ident("name")],
            })
        );
    }

    #[test]
    fn test_ident_undefined() {
        assert_eq!(Expression::ident("undefined"), Expression::Undefined);
    }
}
