//! ZW <-> JSON conversion module
//!
//! This module contains the scalar typing rules, the tree-to-JSON walk,
//! configuration and the high-level conversion engine.

pub mod config;
pub mod engine;
pub mod limits;
pub mod scalar;
pub mod to_json;

pub use config::ZwConfig;

pub use engine::{
    convert_json_to_zw_string, convert_zw_to_json_object, node_to_json, parse_zw, prettify_zw,
    ConversionEngine, ConversionMetadata, ConvertedData, Direction,
};

pub use crate::error::ConversionResult;
