//! Line classification: fence stripping, comment filtering and indentation

use once_cell::sync::Lazy;
use regex::Regex;

/// Spaces per indentation level assumed by the format
pub const INDENT_UNIT: usize = 2;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n(?s:(.*?))\r?\n?```$").expect("valid fence pattern")
});

/// A non-blank, non-comment line of a ZW document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticLine<'a> {
    /// 1-based line number in the original input
    pub number: usize,
    /// Leading whitespace character count
    pub indent: usize,
    pub raw: &'a str,
    /// The line with surrounding whitespace removed
    pub content: &'a str,
}

impl<'a> SemanticLine<'a> {
    pub fn depth(&self) -> usize {
        line_depth(self.indent)
    }

    /// The line with at most `column` leading whitespace characters removed
    pub fn dedent(&self, column: usize) -> &'a str {
        let mut rest = self.raw;
        for _ in 0..column.min(self.indent) {
            let mut chars = rest.chars();
            chars.next();
            rest = chars.as_str();
        }
        rest.trim_end()
    }
}

/// Strip a single enclosing fenced code block.
///
/// Returns the body and the number of lines removed before it, so line
/// numbers can still refer to the caller's input.
pub fn strip_code_fence(text: &str) -> (&str, usize) {
    let trimmed = text.trim();
    match CODE_FENCE.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(body) => {
            let leading_blank = text[..text.len() - text.trim_start().len()]
                .matches('\n')
                .count();
            (body.as_str(), leading_blank + 1)
        }
        None => (text, 0),
    }
}

/// Depth of a non-root line: `max(1, indent / 2)`
pub fn line_depth(indent: usize) -> usize {
    (indent / INDENT_UNIT).max(1)
}

pub fn is_semantic(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Classify `text` into the lines the tree parser consumes
pub fn semantic_lines(text: &str) -> Vec<SemanticLine<'_>> {
    let (body, offset) = strip_code_fence(text);

    body.lines()
        .enumerate()
        .filter(|(_, raw)| is_semantic(raw))
        .map(|(index, raw)| SemanticLine {
            number: index + 1 + offset,
            indent: raw.chars().take_while(|c| c.is_whitespace()).count(),
            raw,
            content: raw.trim(),
        })
        .collect()
}
