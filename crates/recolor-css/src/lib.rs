//! recolor CSS Tree
//!
//! A lightweight, mutable stylesheet tree built on the cssparser tokenizer.
//! Rules keep their selector text and declaration values as source text, so
//! individual values can be rewritten and the sheet printed back out.

mod parser;
mod serializer;
mod scope;

pub use parser::CssParser;
pub use scope::{scope_selector, scope_selectors};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet (the root of the rule tree)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of top-level rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize the tree back to CSS text
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

/// A node of the rule tree
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `selectors { declarations }`
    Style(StyleRule),
    /// Block at-rule that nests rules, e.g. `@media`
    Group(GroupRule),
    /// Any other at-rule, kept verbatim
    Other(OtherRule),
}

impl Rule {
    /// 1-based source line the rule starts on
    pub fn line(&self) -> u32 {
        match self {
            Rule::Style(rule) => rule.line,
            Rule::Group(rule) => rule.line,
            Rule::Other(rule) => rule.line,
        }
    }
}

/// Style rule
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Selector list as written, e.g. `h1, .title > a`
    pub selectors: String,
    pub declarations: Vec<Declaration>,
    pub line: u32,
}

/// Group rule (`@media`, `@supports`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRule {
    /// At-keyword without the `@`
    pub name: String,
    pub prelude: String,
    pub rules: Vec<Rule>,
    pub line: u32,
}

impl GroupRule {
    /// `@name prelude`
    pub fn header(&self) -> String {
        at_rule_header(&self.name, &self.prelude)
    }
}

/// At-rule that carries no nested style rules (`@import`, `@font-face`, `@keyframes`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct OtherRule {
    pub name: String,
    pub prelude: String,
    /// Block contents, `None` for statement at-rules like `@import`
    pub block: Option<String>,
    pub line: u32,
}

impl OtherRule {
    /// `@name prelude`
    pub fn header(&self) -> String {
        at_rule_header(&self.name, &self.prelude)
    }
}

fn at_rule_header(name: &str, prelude: &str) -> String {
    if prelude.is_empty() {
        format!("@{}", name)
    } else {
        format!("@{} {}", name, prelude)
    }
}

/// CSS declaration (property: values)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub values: Vec<Value>,
    pub important: bool,
    pub line: u32,
}

impl Declaration {
    /// The value list as it currently reads
    pub fn value_text(&self) -> String {
        self.values
            .iter()
            .map(|value| format!("{}{}", value.separator, value.text))
            .collect()
    }

    /// `property: values`, with `!important` when set
    pub fn css_text(&self) -> String {
        let important = if self.important { " !important" } else { "" };
        format!("{}: {}{}", self.property, self.value_text(), important)
    }
}

/// One component of a declaration value: a token, or a whole function/bracket block
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Source text as parsed
    pub literal: String,
    /// Text written back on serialization
    pub text: String,
    /// Separator printed before this value: `""`, `" "`, `","` or `", "`
    pub separator: String,
}

impl Value {
    pub fn new(literal: impl Into<String>, separator: impl Into<String>) -> Self {
        let literal = literal.into();
        Self {
            text: literal.clone(),
            literal,
            separator: separator.into(),
        }
    }
}

/// CSS parsing error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse { line: u32, column: u32, message: String },
}
