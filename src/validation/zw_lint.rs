//! ZW document lint
//!
//! Reports problems in a document without changing how it parses: a
//! missing or malformed root is an error, while indentation quirks and
//! lines the parser absorbed or ignored are warnings.

use crate::parser::lines::{semantic_lines, INDENT_UNIT};
use crate::parser::node::DEFAULT_DELIMITER;
use crate::parser::tree::{LineNoteKind, ZwParser};
use serde::Serialize;

/// ZW document validator
pub struct ZwValidator {
    parser: ZwParser,
    /// Treat warnings as errors
    strict: bool,
}

impl Default for ZwValidator {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, false)
    }
}

impl ZwValidator {
    pub fn new(delimiter: &str, strict: bool) -> Self {
        Self {
            parser: ZwParser::new(delimiter),
            strict,
        }
    }

    /// Lint a document
    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut report = ValidationReport::new(self.strict);

        let (result, notes) = self.parser.parse_with_notes(text);
        match result {
            Ok(Some(root)) => report.root_type = Some(root.key),
            Ok(None) => report.add_error(None, "Document is empty"),
            Err(e) => {
                report.add_error(e.line_number, &e.message);
                return report;
            }
        }

        self.check_indentation(text, &mut report);

        for note in notes {
            let message = match note.kind {
                LineNoteKind::Absorbed => "Line continues the previous value",
                LineNoteKind::Dropped => "Line has no value to continue and is ignored",
                LineNoteKind::MixedList => "List items and keys are mixed in the same section",
            };
            report.add_warning(Some(note.line_number), message);
        }

        report.issues.sort_by_key(|issue| issue.line_number);
        report
    }

    fn check_indentation(&self, text: &str, report: &mut ValidationReport) {
        for line in semantic_lines(text).iter().skip(1) {
            let leading = &line.raw[..line.raw.len() - line.raw.trim_start().len()];
            if leading.contains('\t') {
                report.add_warning(Some(line.number), "Tab character in indentation");
            } else if line.indent % INDENT_UNIT != 0 {
                report.add_warning(
                    Some(line.number),
                    &format!(
                        "Indentation of {} spaces is not a multiple of {}",
                        line.indent, INDENT_UNIT
                    ),
                );
            }
        }
    }
}

/// Outcome of linting one document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Root type label, when the document parsed
    pub root_type: Option<String>,

    /// List of validation issues
    pub issues: Vec<ValidationIssue>,

    #[serde(skip)]
    strict: bool,
}

impl ValidationReport {
    /// Create a new validation report
    pub fn new(strict: bool) -> Self {
        Self {
            root_type: None,
            issues: Vec::new(),
            strict,
        }
    }

    /// Add an error to the report
    pub fn add_error(&mut self, line_number: Option<usize>, message: &str) {
        self.issues.push(ValidationIssue {
            severity: IssueSeverity::Error,
            line_number,
            message: message.to_string(),
        });
    }

    /// Add a warning to the report
    pub fn add_warning(&mut self, line_number: Option<usize>, message: &str) {
        let severity = if self.strict {
            IssueSeverity::Error
        } else {
            IssueSeverity::Warning
        };
        self.issues.push(ValidationIssue {
            severity,
            line_number,
            message: message.to_string(),
        });
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count()
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }
}

/// Validation issue
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub line_number: Option<usize>,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        };
        match self.line_number {
            Some(line) => write!(f, "{} (line {}): {}", label, line, self.message),
            None => write!(f, "{}: {}", label, self.message),
        }
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Whether `text` parses into a ZW document with the default delimiter
pub fn validate_zw(text: &str) -> bool {
    matches!(ZwParser::default().parse(text), Ok(Some(_)))
}
