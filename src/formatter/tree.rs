//! Render a parsed ZW tree back to canonical text
//!
//! Scalars are written verbatim, so quoting and continuation lines survive
//! unchanged; only indentation is normalised to two spaces per level.

use crate::formatter::indent;
use crate::parser::node::{ItemValue, ZwListItem, ZwNode, ZwValue};

/// Writes `ZwNode` trees as ZW text
#[derive(Debug, Default)]
pub struct TreeWriter {
    lines: Vec<String>,
}

impl TreeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a document root and everything beneath it
    pub fn write(mut self, root: &ZwNode) -> String {
        self.lines.push(format!("{}{}", root.key, root.delimiter));
        self.write_body(root, 1);
        self.lines.join("\n")
    }

    fn write_body(&mut self, node: &ZwNode, depth: usize) {
        match &node.value {
            ZwValue::Sections(children) => {
                for child in children {
                    self.write_node(child, depth);
                }
            }
            ZwValue::Items(items) => {
                for item in items {
                    self.write_item(item, depth);
                }
            }
            ZwValue::Scalar(text) => self.push_text(indent(depth), &indent(depth), text),
        }
    }

    fn write_node(&mut self, node: &ZwNode, depth: usize) {
        let pad = indent(depth);
        match &node.value {
            ZwValue::Scalar(text) => {
                let prefix = format!("{}{}{} ", pad, node.key, node.delimiter);
                self.push_text(prefix, &pad, text);
            }
            _ => {
                self.lines
                    .push(format!("{}{}{}", pad, node.key, node.delimiter));
                self.write_body(node, depth + 1);
            }
        }
    }

    fn write_item(&mut self, item: &ZwListItem, depth: usize) {
        let marker = format!("{}- ", indent(depth));
        let continuation = indent(depth + 1);

        match (&item.value, &item.item_key) {
            (ItemValue::Scalar(text), None) => self.push_text(marker, &continuation, text),
            (ItemValue::Scalar(text), Some(key)) => {
                let prefix = format!("{}{}{} ", marker, key, item.delimiter);
                self.push_text(prefix, &continuation, text);
            }
            (ItemValue::Nodes(nodes), key) => match nodes.split_first() {
                Some((first, rest)) => {
                    let first_line = self.lines.len();
                    self.write_node(first, depth + 1);
                    if let Some(line) = self.lines.get_mut(first_line) {
                        line.replace_range(..marker.len(), &marker);
                    }
                    for node in rest {
                        self.write_node(node, depth + 1);
                    }
                }
                None => {
                    let key = key.as_deref().unwrap_or_default();
                    self.lines
                        .push(format!("{}{}{}", marker, key, item.delimiter));
                }
            },
        }
    }

    fn push_text(&mut self, prefix: String, continuation: &str, text: &str) {
        let mut parts = text.split('\n');
        let first = parts.next().unwrap_or_default();
        self.lines.push(format!("{}{}", prefix, first).trim_end().to_string());
        for part in parts {
            self.lines.push(format!("{}{}", continuation, part));
        }
    }
}
