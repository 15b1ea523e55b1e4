//! CSS Parser using cssparser
//!
//! Builds the rule tree from the cssparser rule-level parser. Selectors,
//! at-rule preludes and value components are sliced straight out of the
//! source so nothing is lost before it is rewritten.

use cssparser::{
    AtRuleParser, CowRcStr, Delimiter, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, StyleSheetParser, Token,
};

use crate::{CssError, Declaration, GroupRule, OtherRule, Rule, StyleRule, Stylesheet, Value};

/// At-rules whose block holds nested rules
const GROUP_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "-moz-document",
    "layer",
    "container",
    "scope",
];

/// CSS Parser
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);

        let rules = parse_rule_list(&mut parser).map_err(CssError::from_parse)?;
        tracing::debug!("Parsed {} top-level rules", rules.len());

        Ok(Stylesheet { rules })
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Problems the rule parser reports on its own
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
enum SheetIssue {
    #[error("style rule without a selector")]
    EmptySelector,
    #[error("declaration without a value")]
    EmptyValue,
}

impl CssError {
    fn from_parse(error: ParseError<'_, SheetIssue>) -> Self {
        let message = match error.kind {
            ParseErrorKind::Custom(issue) => issue.to_string(),
            ParseErrorKind::Basic(kind) => format!("{:?}", kind),
        };
        CssError::Parse {
            line: error.location.line + 1,
            column: error.location.column,
            message,
        }
    }
}

fn parse_rule_list<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<Vec<Rule>, ParseError<'i, SheetIssue>> {
    let mut rule_parser = RuleParser;
    let mut rules = Vec::new();

    for result in StyleSheetParser::new(input, &mut rule_parser) {
        match result {
            Ok(rule) => rules.push(rule),
            Err((error, _)) => return Err(error),
        }
    }

    Ok(rules)
}

/// Consume every remaining token, skipping over nested blocks
fn consume_all(input: &mut Parser<'_, '_>) {
    while input.next_including_whitespace_and_comments().is_ok() {}
}

struct RuleParser;

struct AtPrelude {
    name: String,
    prelude: String,
}

impl<'i> QualifiedRuleParser<'i> for RuleParser {
    type Prelude = String;
    type QualifiedRule = Rule;
    type Error = SheetIssue;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        consume_all(input);

        let selectors = input.slice_from(start).trim();
        if selectors.is_empty() {
            return Err(input.new_custom_error(SheetIssue::EmptySelector));
        }
        Ok(selectors.to_string())
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(Rule::Style(StyleRule {
            selectors,
            declarations: parse_declarations(input),
            line: start.source_location().line + 1,
        }))
    }
}

impl<'i> AtRuleParser<'i> for RuleParser {
    type Prelude = AtPrelude;
    type AtRule = Rule;
    type Error = SheetIssue;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        consume_all(input);

        Ok(AtPrelude {
            name: name.as_ref().to_ascii_lowercase(),
            prelude: input.slice_from(start).trim().to_string(),
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(Rule::Other(OtherRule {
            name: prelude.name,
            prelude: prelude.prelude,
            block: None,
            line: start.source_location().line + 1,
        }))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let line = start.source_location().line + 1;

        if GROUP_RULES.contains(&prelude.name.as_str()) {
            let rules = parse_rule_list(input)?;
            return Ok(Rule::Group(GroupRule {
                name: prelude.name,
                prelude: prelude.prelude,
                rules,
                line,
            }));
        }

        let body_start = input.position();
        consume_all(input);
        Ok(Rule::Other(OtherRule {
            name: prelude.name,
            prelude: prelude.prelude,
            block: Some(input.slice_from(body_start).trim().to_string()),
            line,
        }))
    }
}

/// Parse the contents of a style rule block.
///
/// Broken declarations are dropped the way browsers drop them; they never
/// fail the whole sheet.
fn parse_declarations(input: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    loop {
        input.skip_whitespace();
        if input.is_exhausted() {
            break;
        }

        let line = input.current_source_location().line + 1;
        let result = input.parse_until_after(Delimiter::Semicolon, |input| {
            parse_declaration(input, line)
        });

        match result {
            Ok(Some(declaration)) => declarations.push(declaration),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Skipping invalid declaration at line {}: {:?}", line, error.kind);
            }
        }
    }

    declarations
}

fn parse_declaration<'i, 't>(
    input: &mut Parser<'i, 't>,
    line: u32,
) -> Result<Option<Declaration>, ParseError<'i, SheetIssue>> {
    // stray `;`
    if input.is_exhausted() {
        return Ok(None);
    }

    let property = input.expect_ident()?.as_ref().to_string();
    input.expect_colon()?;

    let mut values = Vec::new();
    let mut important = false;
    let mut separator = String::new();

    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Comment(_) => {}
            Token::WhiteSpace(_) => {
                if !values.is_empty() && !separator.ends_with(' ') {
                    separator.push(' ');
                }
            }
            Token::Comma => {
                separator.truncate(separator.trim_end().len());
                separator.push(',');
            }
            Token::Delim('!') => {
                input.expect_ident_matching("important")?;
                important = true;
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                input.parse_nested_block(|block| {
                    consume_all(block);
                    Ok::<_, ParseError<'i, SheetIssue>>(())
                })?;
                values.push(Value::new(input.slice_from(start), std::mem::take(&mut separator)));
            }
            _ => {
                values.push(Value::new(input.slice_from(start), std::mem::take(&mut separator)));
            }
        }
    }

    if values.is_empty() {
        return Err(input.new_custom_error(SheetIssue::EmptyValue));
    }

    Ok(Some(Declaration { property, values, important, line }))
}
