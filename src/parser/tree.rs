//! Stack-based tree parser for ZW documents
//!
//! Lines are consumed in order against an explicit stack of open sections.
//! Sections are attached to their parent when they are closed, so the stack
//! owns every node under construction and no parent pointers are needed.

use crate::error::{ParseError, ParseResult};
use crate::parser::lines::{semantic_lines, SemanticLine};
use crate::parser::node::{
    is_key_char, ItemValue, ZwListItem, ZwNode, ZwValue, DEFAULT_DELIMITER,
};
use log::{debug, warn};

/// Width of the `- ` list marker
const ITEM_MARKER: &str = "- ";

/// What happened to a line that did not map onto a node of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineNoteKind {
    /// Appended to the preceding scalar as a continuation line
    Absorbed,
    /// No scalar to extend; the line contributes nothing
    Dropped,
    /// List items and keys met in one section; the keys became key-value items
    MixedList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNote {
    pub line_number: usize,
    pub kind: LineNoteKind,
}

/// A section under construction
#[derive(Debug)]
struct Frame {
    node: ZwNode,
    /// Opened by a `- key:` item; an empty header collapses to `key: ""`
    item_header: bool,
    /// Text column of the scalar most recently appended to this frame
    tail_column: Option<usize>,
}

impl Frame {
    fn new(node: ZwNode) -> Self {
        Self {
            node,
            item_header: false,
            tail_column: None,
        }
    }

    fn header(node: ZwNode) -> Self {
        Self {
            item_header: true,
            ..Self::new(node)
        }
    }

    /// Attach a closed child frame
    fn adopt(&mut self, child: Frame) {
        self.tail_column = None;
        match &mut self.node.value {
            ZwValue::Sections(children) => children.push(child.node),
            ZwValue::Items(items) => match items.last_mut() {
                Some(item) => {
                    let empty_header = child.item_header
                        && matches!(&child.node.value, ZwValue::Sections(c) if c.is_empty())
                        && item.nodes().is_empty();
                    if empty_header {
                        item.value = ItemValue::Scalar(String::new());
                    } else {
                        item.push_property(child.node);
                    }
                }
                None => warn!("list `{}` closed a section with no item", self.node.key),
            },
            ZwValue::Scalar(_) => warn!("leaf `{}` cannot own sections", self.node.key),
        }
    }

    /// The list container's last item if it can take `key: value` properties
    fn property_item(&mut self) -> Option<&mut ZwListItem> {
        match &mut self.node.value {
            ZwValue::Items(items) => items.last_mut().filter(|item| item.accepts_properties()),
            _ => None,
        }
    }

    fn is_list(&self) -> bool {
        self.node.is_list()
    }

    /// Scalar of the most recently appended child or item
    fn last_scalar(&mut self) -> Option<&mut String> {
        match &mut self.node.value {
            ZwValue::Sections(children) => match children.last_mut()?.value {
                ZwValue::Scalar(ref mut text) => Some(text),
                _ => None,
            },
            ZwValue::Items(items) => match &mut items.last_mut()?.value {
                ItemValue::Scalar(text) => Some(text),
                ItemValue::Nodes(nodes) => match nodes.last_mut()?.value {
                    ZwValue::Scalar(ref mut text) => Some(text),
                    _ => None,
                },
            },
            ZwValue::Scalar(_) => None,
        }
    }
}

/// ZW document parser
#[derive(Debug, Clone)]
pub struct ZwParser {
    delimiter: String,
}

impl Default for ZwParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl ZwParser {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Parse a document.
    ///
    /// `Ok(None)` means the text holds no semantic lines at all; `Err` means
    /// the root declaration is missing or carries a value.
    pub fn parse(&self, text: &str) -> ParseResult<Option<ZwNode>> {
        self.parse_with_notes(text).0
    }

    /// Parse a document and report lines that did not become nodes
    pub fn parse_with_notes(&self, text: &str) -> (ParseResult<Option<ZwNode>>, Vec<LineNote>) {
        let mut notes = Vec::new();
        let lines = semantic_lines(text);

        let Some((first, rest)) = lines.split_first() else {
            debug!("document has no semantic lines");
            return (Ok(None), notes);
        };

        let root = match self.parse_root(first) {
            Ok(root) => root,
            Err(e) => return (Err(e), notes),
        };

        let mut stack = vec![Frame::new(root)];
        for line in rest {
            self.consume(&mut stack, line, &mut notes);
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        let root = stack.pop().map(|frame| frame.node);
        (Ok(root), notes)
    }

    fn parse_root(&self, line: &SemanticLine<'_>) -> ParseResult<ZwNode> {
        match self.split_key(line.content) {
            Some((key, "")) => Ok(ZwNode::section(key, 0, &self.delimiter)),
            Some((key, _)) => Err(ParseError::new(format!(
                "root declaration `{}{}` must not carry a value",
                key, self.delimiter
            ))
            .at_line(line.number, line.raw)),
            None => Err(ParseError::new(format!(
                "expected a root type declaration such as `ZW-TYPE{}`",
                self.delimiter
            ))
            .at_line(line.number, line.raw)),
        }
    }

    /// Split `key<delim> value`, returning the key and the trimmed value
    fn split_key<'a>(&self, content: &'a str) -> Option<(&'a str, &'a str)> {
        let key_len = content
            .find(|c: char| !is_key_char(c))
            .unwrap_or(content.len());
        if key_len == 0 {
            return None;
        }
        let rest = content[key_len..].strip_prefix(self.delimiter.as_str())?;
        Some((&content[..key_len], rest.trim()))
    }

    fn consume(&self, stack: &mut Vec<Frame>, line: &SemanticLine<'_>, notes: &mut Vec<LineNote>) {
        let depth = line.depth();
        while stack.len() > 1 && stack.last().is_some_and(|f| f.node.depth >= depth) {
            close_top(stack);
        }

        if let Some(item) = line.content.strip_prefix(ITEM_MARKER) {
            self.push_item(stack, line, item.trim(), notes);
            return;
        }

        match self.split_key(line.content) {
            Some((key, value)) => self.push_entry(stack, line, key, value, notes),
            None => extend_scalar(stack, line, notes),
        }
    }

    fn push_item(
        &self,
        stack: &mut Vec<Frame>,
        line: &SemanticLine<'_>,
        text: &str,
        notes: &mut Vec<LineNote>,
    ) {
        let depth = line.depth();
        let Some(parent) = stack.last_mut() else {
            return;
        };
        if coerce_to_list(&mut parent.node) {
            notes.push(LineNote {
                line_number: line.number,
                kind: LineNoteKind::MixedList,
            });
        }

        let item = match self.split_key(text) {
            Some((key, "")) => ZwListItem {
                value: ItemValue::Nodes(Vec::new()),
                item_key: Some(key.to_string()),
                depth,
                delimiter: self.delimiter.clone(),
            },
            Some((key, value)) => ZwListItem::key_value(key, value, depth, &self.delimiter),
            None => ZwListItem::scalar(text, depth, &self.delimiter),
        };
        let header = match (&item.item_key, &item.value) {
            (Some(key), ItemValue::Nodes(_)) => Some(key.clone()),
            _ => None,
        };

        if let ZwValue::Items(items) = &mut parent.node.value {
            items.push(item);
        }
        parent.tail_column = Some(line.indent + ITEM_MARKER.len());

        if let Some(key) = header {
            parent.tail_column = None;
            stack.push(Frame::header(ZwNode::section(
                key,
                depth + 1,
                &self.delimiter,
            )));
        }
    }

    fn push_entry(
        &self,
        stack: &mut Vec<Frame>,
        line: &SemanticLine<'_>,
        key: &str,
        value: &str,
        notes: &mut Vec<LineNote>,
    ) {
        let depth = line.depth();
        let Some(parent) = stack.last_mut() else {
            return;
        };

        if parent.is_list() && parent.property_item().is_none() {
            // A plain item cannot own keys; the pair starts an item of its own
            warn!(
                "key `{}` follows a plain item in list `{}`; it becomes a key-value item",
                key, parent.node.key
            );
            notes.push(LineNote {
                line_number: line.number,
                kind: LineNoteKind::MixedList,
            });
            self.push_keyed_item(stack, line, key, value);
            return;
        }

        if value.is_empty() {
            parent.tail_column = None;
            stack.push(Frame::new(ZwNode::section(key, depth, &self.delimiter)));
            return;
        }

        let leaf = ZwNode::leaf(key, value, depth, &self.delimiter);
        match parent.property_item() {
            Some(item) => item.push_property(leaf),
            None => {
                if let ZwValue::Sections(children) = &mut parent.node.value {
                    children.push(leaf);
                }
            }
        }
        parent.tail_column = Some(line.indent);
    }

    /// Append `key: value` to the active list as a key-value item. An empty
    /// value opens a section that becomes the item's only property.
    fn push_keyed_item(
        &self,
        stack: &mut Vec<Frame>,
        line: &SemanticLine<'_>,
        key: &str,
        value: &str,
    ) {
        let depth = line.depth();
        let Some(parent) = stack.last_mut() else {
            return;
        };
        let ZwValue::Items(items) = &mut parent.node.value else {
            return;
        };

        if value.is_empty() {
            items.push(ZwListItem {
                value: ItemValue::Nodes(Vec::new()),
                item_key: Some(key.to_string()),
                depth,
                delimiter: self.delimiter.clone(),
            });
            parent.tail_column = None;
            stack.push(Frame::new(ZwNode::section(key, depth, &self.delimiter)));
        } else {
            items.push(ZwListItem::key_value(key, value, depth, &self.delimiter));
            parent.tail_column = Some(line.indent);
        }
    }
}

/// Close the innermost open section; the root is never closed here
fn close_top(stack: &mut Vec<Frame>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(frame) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.adopt(frame);
        }
    }
}

/// Append a continuation line to the active parent's last scalar
fn extend_scalar(stack: &mut [Frame], line: &SemanticLine<'_>, notes: &mut Vec<LineNote>) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    let column = parent.tail_column;
    let kind = match (column, parent.last_scalar()) {
        (Some(column), Some(scalar)) => {
            scalar.push('\n');
            scalar.push_str(line.dedent(column));
            LineNoteKind::Absorbed
        }
        _ => {
            debug!(
                "line {}: nothing to continue, dropping `{}`",
                line.number, line.content
            );
            LineNoteKind::Dropped
        }
    };
    notes.push(LineNote {
        line_number: line.number,
        kind,
    });
}

/// Make `node` a list container. Returns true when keyed children had to be
/// turned into key-value items.
fn coerce_to_list(node: &mut ZwNode) -> bool {
    let children = match &mut node.value {
        ZwValue::Items(_) => return false,
        ZwValue::Sections(children) => std::mem::take(children),
        ZwValue::Scalar(_) => Vec::new(),
    };
    let mixed = !children.is_empty();
    if mixed {
        warn!(
            "section `{}` mixes keys and list items; keys become key-value items",
            node.key
        );
    }

    let items = children
        .into_iter()
        .map(|child| {
            let key = child.key.clone();
            let (depth, delimiter) = (child.depth, child.delimiter.clone());
            let value = match child.value {
                ZwValue::Scalar(text) => ItemValue::Scalar(text),
                _ => ItemValue::Nodes(vec![child]),
            };
            ZwListItem {
                value,
                item_key: Some(key),
                depth,
                delimiter,
            }
        })
        .collect();
    node.value = ZwValue::Items(items);
    mixed
}
