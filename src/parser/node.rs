//! ZW document tree types

use serde::Serialize;

/// Default key/value delimiter
pub const DEFAULT_DELIMITER: &str = ":";

/// Characters allowed in keys and root type labels
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Whether `key` can be read back as a ZW key
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

/// A named section, leaf or list container in a parsed ZW document.
///
/// The root node of a document is always a container at depth 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZwNode {
    pub key: String,
    pub value: ZwValue,
    pub depth: usize,
    pub delimiter: String,
}

/// Value held by a [`ZwNode`]; exactly one shape at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ZwValue {
    /// `key: value` leaf, possibly extended by continuation lines
    Scalar(String),
    /// `key:` section owning nested nodes
    Sections(Vec<ZwNode>),
    /// `key:` section whose children are `- ` items
    Items(Vec<ZwListItem>),
}

/// One `- ` element of a list container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZwListItem {
    pub value: ItemValue,
    /// Present iff the item content itself was `key: value`
    pub item_key: Option<String>,
    pub depth: usize,
    pub delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ItemValue {
    Scalar(String),
    /// Object item: the item's properties as nodes
    Nodes(Vec<ZwNode>),
}

impl ZwNode {
    /// Create an empty section
    pub fn section(key: impl Into<String>, depth: usize, delimiter: &str) -> Self {
        Self {
            key: key.into(),
            value: ZwValue::Sections(Vec::new()),
            depth,
            delimiter: delimiter.to_string(),
        }
    }

    /// Create a leaf holding `value` verbatim
    pub fn leaf(
        key: impl Into<String>,
        value: impl Into<String>,
        depth: usize,
        delimiter: &str,
    ) -> Self {
        Self {
            key: key.into(),
            value: ZwValue::Scalar(value.into()),
            depth,
            delimiter: delimiter.to_string(),
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self.value, ZwValue::Sections(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.value, ZwValue::Scalar(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, ZwValue::Items(_))
    }

    pub fn scalar(&self) -> Option<&str> {
        match &self.value {
            ZwValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ZwNode] {
        match &self.value {
            ZwValue::Sections(children) => children,
            _ => &[],
        }
    }

    pub fn items(&self) -> &[ZwListItem] {
        match &self.value {
            ZwValue::Items(items) => items,
            _ => &[],
        }
    }

    /// First child node with the given key
    pub fn get(&self, key: &str) -> Option<&ZwNode> {
        self.children().iter().find(|child| child.key == key)
    }
}

impl ZwListItem {
    pub fn scalar(value: impl Into<String>, depth: usize, delimiter: &str) -> Self {
        Self {
            value: ItemValue::Scalar(value.into()),
            item_key: None,
            depth,
            delimiter: delimiter.to_string(),
        }
    }

    pub fn key_value(
        key: impl Into<String>,
        value: impl Into<String>,
        depth: usize,
        delimiter: &str,
    ) -> Self {
        Self {
            value: ItemValue::Scalar(value.into()),
            item_key: Some(key.into()),
            depth,
            delimiter: delimiter.to_string(),
        }
    }

    pub fn is_key_value(&self) -> bool {
        self.item_key.is_some()
    }

    /// Nested property nodes, empty for scalar items
    pub fn nodes(&self) -> &[ZwNode] {
        match &self.value {
            ItemValue::Nodes(nodes) => nodes,
            ItemValue::Scalar(_) => &[],
        }
    }

    /// Whether further `key: value` lines can attach to this item
    pub fn accepts_properties(&self) -> bool {
        self.item_key.is_some() || matches!(self.value, ItemValue::Nodes(_))
    }

    /// Append a property, turning a key-value item into an object item whose
    /// first property is the original pair.
    pub(crate) fn push_property(&mut self, node: ZwNode) {
        match &mut self.value {
            ItemValue::Nodes(nodes) => nodes.push(node),
            ItemValue::Scalar(text) => {
                let mut nodes = Vec::with_capacity(2);
                if let Some(key) = &self.item_key {
                    let first = ZwNode::leaf(
                        key.clone(),
                        std::mem::take(text),
                        self.depth + 1,
                        &self.delimiter,
                    );
                    nodes.push(first);
                }
                nodes.push(node);
                self.value = ItemValue::Nodes(nodes);
            }
        }
    }
}
