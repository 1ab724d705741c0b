//! ZW document validation module

pub mod zw_lint;

pub use zw_lint::{validate_zw, IssueSeverity, ValidationIssue, ValidationReport, ZwValidator};
