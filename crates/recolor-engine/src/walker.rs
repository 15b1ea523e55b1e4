//! Tree walker
//!
//! Scopes selectors, recolors declarations and prunes whatever has nothing
//! recolored left in it.

use recolor_color::ColorTransform;
use recolor_css::{Declaration, Rule, Stylesheet, scope_selectors};

use crate::value::{Outcome, process_value};

pub(crate) struct Walker<'a> {
    transform: &'a mut dyn ColorTransform,
    marker_class: &'a str,
    errors: Vec<String>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(transform: &'a mut dyn ColorTransform, marker_class: &'a str) -> Self {
        Self {
            transform,
            marker_class,
            errors: Vec::new(),
        }
    }

    /// Process the whole sheet. Returns whether anything survived.
    pub(crate) fn process_stylesheet(&mut self, stylesheet: &mut Stylesheet) -> bool {
        self.prune(&mut stylesheet.rules);
        !stylesheet.rules.is_empty()
    }

    /// Errors collected so far, in traversal order
    pub(crate) fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn process_rule(&mut self, rule: &mut Rule) -> bool {
        match rule {
            Rule::Style(style) => {
                style.selectors = scope_selectors(&style.selectors, self.marker_class);

                let declarations = std::mem::take(&mut style.declarations);
                style.declarations = declarations
                    .into_iter()
                    .filter_map(|mut declaration| {
                        self.process_declaration(&mut declaration).then_some(declaration)
                    })
                    .collect();

                !style.declarations.is_empty()
            }
            Rule::Group(group) => {
                self.prune(&mut group.rules);
                !group.rules.is_empty()
            }
            Rule::Other(other) => {
                tracing::debug!("Dropping {} at line {}", other.header(), other.line);
                false
            }
        }
    }

    /// Replace `rules` with the ones that survive processing
    fn prune(&mut self, rules: &mut Vec<Rule>) {
        let children = std::mem::take(rules);
        *rules = children
            .into_iter()
            .filter_map(|mut rule| self.process_rule(&mut rule).then_some(rule))
            .collect();
    }

    /// A declaration survives when at least one of its values was recolored
    fn process_declaration(&mut self, declaration: &mut Declaration) -> bool {
        let source_text = declaration.css_text();
        let mut batch = Vec::new();
        let mut transformed = false;

        for value in &mut declaration.values {
            if process_value(value, &mut *self.transform, &mut batch) == Outcome::Transformed {
                transformed = true;
            }
        }

        if !batch.is_empty() {
            self.errors
                .push(format!("At line {}, declaration '{}'", declaration.line, source_text));
            self.errors.append(&mut batch);
        }

        transformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recolor_color::{Color, ColorLike, TransformError};
    use recolor_css::parse_stylesheet;

    fn walk(css: &str, transform: &mut dyn ColorTransform) -> (Stylesheet, Vec<String>) {
        let mut sheet = parse_stylesheet(css).unwrap();
        let mut walker = Walker::new(transform, "t");
        walker.process_stylesheet(&mut sheet);
        (sheet, walker.into_errors())
    }

    fn identity(_: &str, color: Color) -> Result<ColorLike, TransformError> {
        Ok(ColorLike::Color(color))
    }

    #[test]
    fn test_declarations_without_colors_are_removed() {
        let (sheet, errors) = walk(".a { margin: 0; color: red; padding: 1px; }", &mut identity);
        assert_eq!(sheet.to_css(), ".t .a {\n  color: #ff0000;\n}\n");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_rules_and_groups_are_removed() {
        let css = r#"
            .a { display: none; }
            @media print { .b { margin: 0; } }
            @supports (color: red) { .c { color: red; } .d { width: 0; } }
        "#;
        let (sheet, _) = walk(css, &mut identity);
        assert_eq!(
            sheet.to_css(),
            "@supports (color: red) {\n  .t .c {\n    color: #ff0000;\n  }\n}\n"
        );
    }

    #[test]
    fn test_other_rules_are_removed() {
        let css = "@import url(a.css);\n\
                   @font-face { font-family: X; color: red; }\n\
                   @keyframes k { to { color: red; } }";
        let (sheet, errors) = walk(css, &mut identity);
        assert!(sheet.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_errors_batched_per_declaration() {
        let css = ".a {\n  color: red;\n  border: 1px solid red;\n  background: blue;\n}";
        let mut only_blue = |hex: &str, color: Color| -> Result<ColorLike, TransformError> {
            if hex == "#0000ff" {
                Ok(ColorLike::Color(color))
            } else {
                Err(TransformError::new("unmapped"))
            }
        };
        let (sheet, errors) = walk(css, &mut only_blue);

        assert_eq!(sheet.to_css(), ".t .a {\n  background: #0000ff;\n}\n");
        assert_eq!(
            errors,
            vec![
                "At line 2, declaration 'color: red'",
                "Failed to call function with color 'red', returned value: none, error: unmapped",
                "At line 3, declaration 'border: 1px solid red'",
                "Failed to call function with color 'red', returned value: none, error: unmapped",
            ]
        );
    }

    #[test]
    fn test_partial_failure_keeps_declaration() {
        let css = ".s { box-shadow: 0 0 1px red, 0 0 2px blue; }";
        let mut fail_red = |hex: &str, color: Color| -> Result<ColorLike, TransformError> {
            if hex == "#ff0000" {
                Err(TransformError::new("unmapped"))
            } else {
                Ok(ColorLike::Color(color))
            }
        };
        let (sheet, errors) = walk(css, &mut fail_red);

        assert_eq!(sheet.to_css(), ".t .s {\n  box-shadow: 0 0 1px red, 0 0 2px #0000ff;\n}\n");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "At line 1, declaration 'box-shadow: 0 0 1px red, 0 0 2px blue'");
    }

    #[test]
    fn test_important_kept() {
        let (sheet, _) = walk(".a { color: white !important; }", &mut identity);
        assert_eq!(sheet.to_css(), ".t .a {\n  color: #ffffff !important;\n}\n");
    }
}
