//! ZW parsing module: line classification, tree building and input sources

pub mod directory;
pub mod filter;
pub mod lines;
pub mod node;
pub mod source;
pub mod tree;

pub use node::{ItemValue, ZwListItem, ZwNode, ZwValue, DEFAULT_DELIMITER};
pub use source::{parse_json_text, InputSource};
pub use tree::{LineNote, LineNoteKind, ZwParser};
