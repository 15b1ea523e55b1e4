//! Selector scoping
//!
//! Rewrites a selector list so every selector only matches inside an element
//! carrying a marker class. Selectors that address the root `html` element
//! get the class attached to `html` itself.

use std::sync::LazyLock;

use regex::Regex;

/// Standalone `html` type selector, followed by the end, whitespace, a class or an id
static HTML_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\s)html($|[\s.#])").expect("html selector pattern"));

/// Scope every selector of a comma-separated list and join them with `", "`
pub fn scope_selectors(selectors: &str, marker_class: &str) -> String {
    split_selector_list(selectors)
        .into_iter()
        .map(str::trim)
        .filter(|selector| !selector.is_empty())
        .map(|selector| scope_selector(selector, marker_class))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scope a single selector.
///
/// Only the first `html` occurrence outside brackets and strings is rewritten.
pub fn scope_selector(selector: &str, marker_class: &str) -> String {
    let selector = selector.trim();

    let mut top_level = Vec::new();
    for_each_top_level(selector, |i, _| top_level.push(i));

    let html = HTML_SELECTOR.captures_iter(selector).find_map(|caps| {
        let (whole, lead, follower) = (caps.get(0)?, caps.get(1)?, caps.get(2)?);
        top_level
            .binary_search(&lead.end())
            .is_ok()
            .then(|| (whole.range(), lead.as_str(), follower.as_str()))
    });

    let Some((range, lead, follower)) = html else {
        return format!(".{} {}", marker_class, selector);
    };

    // a whitespace follower is replaced by the space after the class
    let follower = if follower.trim().is_empty() { "" } else { follower };
    format!(
        "{}{}html.{} {}{}",
        &selector[..range.start],
        lead,
        marker_class,
        follower,
        &selector[range.end..]
    )
}

/// Split on commas that are outside brackets and strings
fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for_each_top_level(list, |i, ch| {
        if ch == ',' {
            parts.push(&list[start..i]);
            start = i + 1;
        }
    });
    parts.push(&list[start..]);

    parts
}

/// Call `visit` with every char that sits outside brackets and strings
fn for_each_top_level(text: &str, mut visit: impl FnMut(usize, char)) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' | '\'' => match quote {
                Some(open) if open == ch => quote = None,
                None => quote = Some(ch),
                _ => {}
            },
            _ if quote.is_some() => {}
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => visit(i, ch),
            _ => {}
        }
    }
}
