//! ZW tree -> JSON value conversion

use crate::conversion::scalar::typed_scalar;
use crate::parser::node::{ItemValue, ZwListItem, ZwNode, ZwValue};
use log::warn;
use serde_json::{Map, Value};

/// Walks a parsed tree into plain JSON values
#[derive(Debug, Clone, Default)]
pub struct ZwJsonConverter {
    max_depth: Option<usize>,
}

impl ZwJsonConverter {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    /// Convert a document root.
    ///
    /// Sections become an object and a list root becomes an array. `None`
    /// signals a structural failure: a scalar root or nesting beyond the
    /// configured depth.
    pub fn convert(&self, root: &ZwNode) -> Option<Value> {
        if root.is_leaf() {
            warn!("root `{}` is a leaf, not a document", root.key);
            return None;
        }
        self.node_value(root, 0)
    }

    fn node_value(&self, node: &ZwNode, depth: usize) -> Option<Value> {
        self.check_depth(depth)?;
        match &node.value {
            ZwValue::Scalar(text) => Some(typed_scalar(text)),
            ZwValue::Sections(children) => self.object(children, depth),
            ZwValue::Items(items) => items
                .iter()
                .map(|item| self.item_value(item, depth + 1))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
        }
    }

    fn object(&self, nodes: &[ZwNode], depth: usize) -> Option<Value> {
        let mut map = Map::with_capacity(nodes.len());
        for node in nodes {
            map.insert(node.key.clone(), self.node_value(node, depth + 1)?);
        }
        Some(Value::Object(map))
    }

    fn item_value(&self, item: &ZwListItem, depth: usize) -> Option<Value> {
        self.check_depth(depth)?;
        match (&item.value, &item.item_key) {
            (ItemValue::Nodes(nodes), _) => self.object(nodes, depth),
            (ItemValue::Scalar(text), Some(key)) => {
                let mut map = Map::with_capacity(1);
                map.insert(key.clone(), typed_scalar(text));
                Some(Value::Object(map))
            }
            (ItemValue::Scalar(text), None) => Some(typed_scalar(text)),
        }
    }

    fn check_depth(&self, depth: usize) -> Option<()> {
        match self.max_depth {
            Some(max) if depth > max => {
                warn!("document nesting exceeds maximum depth of {}", max);
                None
            }
            _ => Some(()),
        }
    }
}
