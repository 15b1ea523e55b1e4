//! Stylesheet serialization

use std::fmt::{self, Write};

use crate::{Rule, Stylesheet};

const INDENT: &str = "  ";

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write_rule(f, rule, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rule(f, self, 0)
    }
}

fn write_rule(out: &mut impl Write, rule: &Rule, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);

    match rule {
        Rule::Style(style) => {
            writeln!(out, "{}{} {{", indent, style.selectors)?;
            for declaration in &style.declarations {
                writeln!(out, "{}{}{};", indent, INDENT, declaration.css_text())?;
            }
            writeln!(out, "{}}}", indent)
        }
        Rule::Group(group) => {
            writeln!(out, "{}{} {{", indent, group.header())?;
            for child in &group.rules {
                write_rule(out, child, depth + 1)?;
            }
            writeln!(out, "{}}}", indent)
        }
        Rule::Other(other) => match &other.block {
            None => writeln!(out, "{}{};", indent, other.header()),
            Some(block) if block.is_empty() => writeln!(out, "{}{} {{}}", indent, other.header()),
            Some(block) => writeln!(out, "{}{} {{ {} }}", indent, other.header(), block),
        },
    }
}
